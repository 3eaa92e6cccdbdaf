use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::debug;

use super::node::{BinaryNode, NodePtr, TreeNode};
use crate::error::{Error, Result};

///Leftmost node of the subtree rooted at `subtree`
pub fn get_minimal<N: BinaryNode>(subtree: &N) -> &N {
    match subtree.left() {
        Some(left) => get_minimal(left),
        None => subtree,
    }
}

///Rightmost node of the subtree rooted at `subtree`
pub fn get_maximal<N: BinaryNode>(subtree: &N) -> &N {
    match subtree.right() {
        Some(right) => get_maximal(right),
        None => subtree,
    }
}

/// In-order successor of `node` within its own subtree: the leftmost node of
/// its right subtree. Nodes are unaware of their parents, so a node without a
/// right subtree (the maximum among others) has no successor here.
pub fn get_successor<N: BinaryNode>(node: &N) -> Option<&N> {
    node.right().map(get_minimal)
}

///Recursively searches through subtree for node with key
pub fn search<'a, N>(subtree: Option<&'a N>, key: &N::Key) -> Option<&'a N>
where
    N: BinaryNode,
    N::Key: Ord,
{
    let node = subtree?;
    match key.cmp(node.key()) {
        Ordering::Less => search(node.left(), key),
        Ordering::Greater => search(node.right(), key),
        Ordering::Equal => Some(node),
    }
}

/// In-order (ascending key) iterator over any binary tree.
pub struct Iter<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: BinaryNode + 'a> Iter<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, N: BinaryNode + 'a> Iterator for Iter<'a, N> {
    type Item = (&'a N::Key, &'a N::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some((node.key(), node.value()))
    }
}

/// Unbalanced binary search tree with unique keys.
///
/// Recursive operations take ownership of a subtree and hand back its new
/// root, which the caller stores in the link it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySearchTree<K, V> {
    root: NodePtr<TreeNode<K, V>>,
    len: usize,
}

impl<K, V> Default for BinarySearchTree<K, V> {
    fn default() -> Self {
        BinarySearchTree { root: None, len: 0 }
    }
}

impl<K: Ord + Debug, V> BinarySearchTree<K, V> {
    pub fn new() -> BinarySearchTree<K, V> {
        Self::default()
    }
    ///Returns number of elements in tree
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn root(&self) -> Option<&TreeNode<K, V>> {
        self.root.as_deref()
    }
    pub fn contains_key(&self, key: &K) -> bool {
        search(self.root(), key).is_some()
    }
    ///Node holding `key`
    pub fn get_node(&self, key: &K) -> Result<&TreeNode<K, V>> {
        search(self.root(), key).ok_or_else(|| Error::key_not_found(key))
    }
    pub fn get(&self, key: &K) -> Result<&V> {
        self.get_node(key).map(|node| &node.value)
    }
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Ok(&mut node.value),
            };
        }
        Err(Error::key_not_found(key))
    }
    pub fn min(&self) -> Option<(&K, &V)> {
        self.root().map(get_minimal).map(|node| (&node.key, &node.value))
    }
    pub fn max(&self) -> Option<(&K, &V)> {
        self.root().map(get_maximal).map(|node| (&node.key, &node.value))
    }
    pub fn iter(&self) -> Iter<'_, TreeNode<K, V>> {
        Iter::new(self.root())
    }

    ///Inserts key-value pair, rejecting keys that are already present
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.contains_key(&key) {
            debug!(key = ?key, "rejected duplicate insert");
            return Err(Error::duplicate_key(&key));
        }
        self.root = Some(Self::insert_aux(self.root.take(), key, value));
        self.len += 1;
        Ok(())
    }
    fn insert_aux(current: NodePtr<TreeNode<K, V>>, key: K, value: V) -> Box<TreeNode<K, V>> {
        let Some(mut node) = current else {
            return Box::new(TreeNode::new(key, value));
        };
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_aux(node.left.take(), key, value)),
            Ordering::Greater => node.right = Some(Self::insert_aux(node.right.take(), key, value)),
            Ordering::Equal => unreachable!("duplicate keys are rejected before descending"),
        }
        node
    }

    ///Deletes node with key from tree, returns its value
    pub fn delete(&mut self, key: &K) -> Result<V> {
        match self.root.take() {
            Some(root) if search(Some(&*root), key).is_some() => {
                let (new_root, value) = Self::delete_aux(root, key);
                self.root = new_root;
                self.len -= 1;
                Ok(value)
            }
            root => {
                self.root = root;
                debug!(key = ?key, "rejected delete of missing key");
                Err(Error::key_not_found(key))
            }
        }
    }
    ///Deletes key (known to be present) from subtree, returns (replacement node, removed value)
    fn delete_aux(mut current: Box<TreeNode<K, V>>, key: &K) -> (NodePtr<TreeNode<K, V>>, V) {
        match key.cmp(&current.key) {
            Ordering::Less => {
                let left = current.left.take().unwrap_or_else(|| panic!("Key missing from left subtree"));
                let (replacement, removed) = Self::delete_aux(left, key);
                current.left = replacement;
                (Some(current), removed)
            }
            Ordering::Greater => {
                let right = current.right.take().unwrap_or_else(|| panic!("Key missing from right subtree"));
                let (replacement, removed) = Self::delete_aux(right, key);
                current.right = replacement;
                (Some(current), removed)
            }
            Ordering::Equal => match (current.left.take(), current.right.take()) {
                (None, None) => (None, current.value),
                (Some(child), None) | (None, Some(child)) => (Some(child), current.value),
                (Some(left), Some(right)) => {
                    //overwrite with the successor (leftmost of right subtree) and unlink it
                    let (new_right, successor) = Self::take_minimal(right);
                    let TreeNode {
                        key: successor_key,
                        value: successor_value,
                        ..
                    } = *successor;
                    current.left = Some(left);
                    current.right = new_right;
                    current.key = successor_key;
                    let removed = std::mem::replace(&mut current.value, successor_value);
                    (Some(current), removed)
                }
            },
        }
    }
    ///Detaches the smallest node of subtree, returns (new subtree root, detached node)
    fn take_minimal(mut subtree: Box<TreeNode<K, V>>) -> (NodePtr<TreeNode<K, V>>, Box<TreeNode<K, V>>) {
        match subtree.left.take() {
            Some(left) => {
                let (new_left, minimal) = Self::take_minimal(left);
                subtree.left = new_left;
                (Some(subtree), minimal)
            }
            None => (subtree.right.take(), subtree),
        }
    }
}
