use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::{debug, trace};

use super::bst::{get_maximal, get_minimal, search, Iter};
use super::node::{AvlNode, NodePtr};
use crate::error::{Error, Result};

type Link<K, V> = NodePtr<AvlNode<K, V>>;

/// Self-balancing binary search tree with order statistics.
///
/// Every node keeps the size of its right subtree, which lets
/// [`AvlTree::kth_largest`] walk a single root-to-node path. Recursive
/// helpers take a subtree by value and return its (possibly rotated) root for
/// the caller to store back into the link it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AvlTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        AvlTree { root: None, len: 0 }
    }
}

impl<K: Ord + Debug, V> AvlTree<K, V> {
    ///Creates a new AVL tree instance
    pub fn new() -> AvlTree<K, V> {
        Self::default()
    }
    ///Returns number of elements in tree
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn root(&self) -> Option<&AvlNode<K, V>> {
        self.root.as_deref()
    }
    ///Height of the whole tree, -1 when empty
    pub fn height(&self) -> i32 {
        AvlNode::height_of(&self.root)
    }
    pub fn contains_key(&self, key: &K) -> bool {
        search(self.root(), key).is_some()
    }
    pub fn get_node(&self, key: &K) -> Result<&AvlNode<K, V>> {
        search(self.root(), key).ok_or_else(|| Error::key_not_found(key))
    }
    ///Searches tree for key, returns value if exists
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
    ///Ascending key order
    pub fn iter(&self) -> Iter<'_, AvlNode<K, V>> {
        Iter::new(self.root())
    }

    ///Inserts key-value pair into tree, fails if key is already present
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        //checked up front so a failed insert leaves every right_count untouched
        if self.contains_key(&key) {
            debug!(key = ?key, "rejected duplicate insert");
            return Err(Error::duplicate_key(&key));
        }
        self.root = Some(Self::insert_aux(self.root.take(), key, value));
        self.len += 1;
        Ok(())
    }
    ///Insert key-value pair into subtree, returns new subtree root
    fn insert_aux(current: Link<K, V>, key: K, value: V) -> Box<AvlNode<K, V>> {
        let Some(mut node) = current else {
            return Box::new(AvlNode::new(key, value));
        };
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_aux(node.left.take(), key, value)),
            Ordering::Greater => {
                node.right_count += 1;
                node.right = Some(Self::insert_aux(node.right.take(), key, value));
            }
            Ordering::Equal => unreachable!("duplicate keys are rejected before descending"),
        }
        node.recalc_height();
        Self::rebalance(node)
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
    fn delete_aux(mut current: Box<AvlNode<K, V>>, key: &K) -> (Link<K, V>, V) {
        let removed = match key.cmp(&current.key) {
            Ordering::Less => {
                let left = current.left.take().unwrap_or_else(|| panic!("Key missing from left subtree"));
                let (replacement, removed) = Self::delete_aux(left, key);
                current.left = replacement;
                removed
            }
            Ordering::Greater => {
                let right = current.right.take().unwrap_or_else(|| panic!("Key missing from right subtree"));
                current.right_count -= 1;
                let (replacement, removed) = Self::delete_aux(right, key);
                current.right = replacement;
                removed
            }
            Ordering::Equal => match (current.left.take(), current.right.take()) {
                (None, None) => return (None, current.value),
                (Some(child), None) | (None, Some(child)) => return (Some(child), current.value),
                (Some(left), Some(right)) => {
                    //successor is the leftmost node of the right subtree, which shrinks by one
                    let (new_right, successor) = Self::take_minimal(right);
                    let AvlNode {
                        key: successor_key,
                        value: successor_value,
                        ..
                    } = *successor;
                    current.left = Some(left);
                    current.right = new_right;
                    current.key = successor_key;
                    current.right_count -= 1;
                    std::mem::replace(&mut current.value, successor_value)
                }
            },
        };
        current.recalc_height();
        (Some(Self::rebalance(current)), removed)
    }
    ///Removes the node with smallest key in subtree, returns (new subtree root, removed node)
    fn take_minimal(mut subtree: Box<AvlNode<K, V>>) -> (Link<K, V>, Box<AvlNode<K, V>>) {
        match subtree.left.take() {
            Some(left) => {
                //only left turns on the way down, so no right_count changes
                let (new_left, minimal) = Self::take_minimal(left);
                subtree.left = new_left;
                subtree.recalc_height();
                (Some(Self::rebalance(subtree)), minimal)
            }
            None => (subtree.right.take(), subtree),
        }
    }

    /// Promotes the right child of `current`.
    ///
    /// ```text
    ///      current                      child
    ///     /       \                    /     \
    ///  l-tree    child      ->    current    r-tree
    ///           /     \           /     \
    ///       center   r-tree    l-tree  center
    /// ```
    pub(crate) fn left_rotate(mut current: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
        let mut child = current
            .right
            .take()
            .unwrap_or_else(|| panic!("Nothing to rotate left on"));
        trace!(pivot = ?current.key, "left rotation");
        current.right = child.left.take();
        //current keeps only center on its right
        current.right_count -= child.right_count + 1;
        current.recalc_height();

        child.left = Some(current);
        child.recalc_height();
        child
    }
    /// Promotes the left child of `current`; mirror image of
    /// [`left_rotate`](Self::left_rotate).
    pub(crate) fn right_rotate(mut current: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
        let mut child = current
            .left
            .take()
            .unwrap_or_else(|| panic!("Nothing to rotate right on"));
        trace!(pivot = ?current.key, "right rotation");
        current.left = child.right.take();
        current.recalc_height();

        //current and its right subtree now hang off child's right
        child.right_count += current.right_count + 1;
        child.right = Some(current);
        child.recalc_height();
        child
    }
    ///Restores the balance of a subtree whose children are balanced, returns new subtree root
    pub(crate) fn rebalance(mut current: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
        let balance = current.balance();
        if balance >= 2 {
            //right heavy
            let right = current
                .right
                .take()
                .unwrap_or_else(|| panic!("Right heavy node without right child"));
            current.right = Some(if AvlNode::height_of(&right.left) > AvlNode::height_of(&right.right) {
                Self::right_rotate(right)
            } else {
                right
            });
            Self::left_rotate(current)
        } else if balance <= -2 {
            //left heavy
            let left = current
                .left
                .take()
                .unwrap_or_else(|| panic!("Left heavy node without left child"));
            current.left = Some(if AvlNode::height_of(&left.right) > AvlNode::height_of(&left.left) {
                Self::left_rotate(left)
            } else {
                left
            });
            Self::right_rotate(current)
        } else {
            current
        }
    }

    /// Returns the node holding the k-th largest key, `k = 1` being the
    /// maximum. Walks one root-to-node path.
    pub fn kth_largest(&self, k: usize) -> Result<&AvlNode<K, V>> {
        if k == 0 || k > self.len {
            return Err(Error::InvalidArgument(format!(
                "k must be between 1 and {}, got {k}",
                self.len
            )));
        }
        Ok(Self::kth_largest_aux(self.root(), k))
    }
    fn kth_largest_aux(current: Option<&AvlNode<K, V>>, k: usize) -> &AvlNode<K, V> {
        let node = current.unwrap_or_else(|| panic!("right_count out of sync with tree length"));
        match k.cmp(&(node.right_count + 1)) {
            //exactly right_count keys are larger than this one
            Ordering::Equal => node,
            Ordering::Less => Self::kth_largest_aux(node.right.as_deref(), k),
            Ordering::Greater => Self::kth_largest_aux(node.left.as_deref(), k - node.right_count - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::node::BinaryNode;
    use pretty_assertions::assert_eq;

    type TestNode = Box<AvlNode<i32, &'static str>>;

    fn node(
        key: i32,
        value: &'static str,
        height: usize,
        right_count: usize,
        left: Option<TestNode>,
        right: Option<TestNode>,
    ) -> TestNode {
        Box::new(AvlNode {
            key,
            value,
            height,
            right_count,
            left,
            right,
        })
    }
    fn leaf(key: i32, value: &'static str) -> Option<TestNode> {
        Some(node(key, value, 0, 0, None, None))
    }

    /// ```text
    ///      2
    ///     / \
    ///    1   4
    ///       / \
    ///      3   5
    /// ```
    fn get_right_heavy_subtree() -> TestNode {
        node(
            2,
            "current",
            2,
            3,
            leaf(1, "l-tree"),
            Some(node(4, "child", 1, 1, leaf(3, "center"), leaf(5, "r-tree"))),
        )
    }
    /// ```text
    ///        4
    ///       / \
    ///      2   5
    ///     / \
    ///    1   3
    /// ```
    fn get_left_heavy_subtree() -> TestNode {
        node(
            4,
            "child",
            2,
            1,
            Some(node(2, "current", 1, 1, leaf(1, "l-tree"), leaf(3, "center"))),
            leaf(5, "r-tree"),
        )
    }

    fn get_sample_tree() -> AvlTree<i32, &'static str> {
        let mut tree = AvlTree::new();
        for (key, value) in [
            (15, "A"),
            (10, "B"),
            (20, "C"),
            (17, "D"),
            (5, "E"),
            (3, "F"),
            (4, "G"),
            (22, "H"),
        ] {
            tree.insert(key, value).unwrap();
        }
        tree
    }

    ///Returns (height, size) of subtree after checking every stored height, count and balance
    fn check_subtree(subtree: Option<&AvlNode<i32, &'static str>>) -> (i32, usize) {
        let Some(node) = subtree else {
            return (-1, 0);
        };
        let (left_height, left_size) = check_subtree(node.left());
        let (right_height, right_size) = check_subtree(node.right());
        assert_eq!(node.height() as i32, 1 + left_height.max(right_height), "height of {}", node.key);
        assert_eq!(node.right_count(), right_size, "right_count of {}", node.key);
        assert!(node.balance().abs() <= 1, "balance of {}", node.key);
        (node.height() as i32, left_size + right_size + 1)
    }

    #[test]
    fn test_left_rotate() {
        let rotated = AvlTree::left_rotate(get_right_heavy_subtree());
        assert_eq!(rotated, get_left_heavy_subtree());
    }

    #[test]
    fn test_right_rotate() {
        let rotated = AvlTree::right_rotate(get_left_heavy_subtree());
        assert_eq!(rotated, get_right_heavy_subtree());
    }

    #[test]
    #[should_panic(expected = "Nothing to rotate left on")]
    fn test_left_rotate_without_child() {
        let _ = AvlTree::left_rotate(node(1, "a", 0, 0, None, None));
    }

    #[test]
    fn test_rebalance_right_right() {
        let chain = node(
            10,
            "Node 10",
            2,
            2,
            None,
            Some(node(15, "Node 15", 1, 1, None, leaf(20, "Node 20"))),
        );
        let expected = node(15, "Node 15", 1, 1, leaf(10, "Node 10"), leaf(20, "Node 20"));
        assert_eq!(AvlTree::rebalance(chain), expected);
    }

    #[test]
    fn test_rebalance_right_left() {
        let zigzag = node(
            10,
            "Node 10",
            2,
            2,
            None,
            Some(node(20, "Node 20", 1, 0, leaf(15, "Node 15"), None)),
        );
        let expected = node(15, "Node 15", 1, 1, leaf(10, "Node 10"), leaf(20, "Node 20"));
        assert_eq!(AvlTree::rebalance(zigzag), expected);
    }

    #[test]
    fn test_rebalance_left_right() {
        let zigzag = node(
            20,
            "Node 20",
            2,
            0,
            Some(node(10, "Node 10", 1, 1, None, leaf(15, "Node 15"))),
            None,
        );
        let expected = node(15, "Node 15", 1, 1, leaf(10, "Node 10"), leaf(20, "Node 20"));
        assert_eq!(AvlTree::rebalance(zigzag), expected);
    }

    #[test]
    fn test_rebalance_balanced_is_noop() {
        assert_eq!(AvlTree::rebalance(get_left_heavy_subtree()), get_left_heavy_subtree());
    }

    #[test]
    fn test_insert_size() {
        let mut tree = AvlTree::<&str, u32>::new();
        tree.insert("a", 1).unwrap();
        tree.insert("c", 3).unwrap();
        tree.insert("b", 2).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_run_through() {
        let mut tree = get_sample_tree();
        let root = tree.root().unwrap();
        assert_eq!(root.value, "A");
        assert_eq!(root.left().unwrap().left().unwrap().value, "F");
        assert_eq!(root.right().unwrap().left().unwrap().value, "D");
        assert_eq!(root.left().unwrap().right().unwrap().value, "B");
        check_subtree(tree.root());

        assert_eq!(tree.delete(&20), Ok("C"));
        check_subtree(tree.root());
        assert_eq!(tree.delete(&17), Ok("D"));
        check_subtree(tree.root());

        let root = tree.root().unwrap();
        assert_eq!(root.value, "E");
        assert_eq!(root.right().unwrap().left().unwrap().value, "B");
        assert_eq!(root.left().unwrap().value, "F");
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_kth_largest() {
        let tree = get_sample_tree();
        let keys: Vec<i32> = (1..=8).map(|k| tree.kth_largest(k).unwrap().key).collect();
        assert_eq!(keys, vec![22, 20, 17, 15, 10, 5, 4, 3]);
    }

    #[test]
    fn test_kth_largest_out_of_range() {
        let tree = get_sample_tree();
        assert!(matches!(tree.kth_largest(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(tree.kth_largest(9), Err(Error::InvalidArgument(_))));
        assert!(AvlTree::<i32, ()>::new().kth_largest(1).is_err());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = get_sample_tree();
        let before = tree.clone();
        assert_eq!(tree.insert(4, "X"), Err(Error::DuplicateKey("4".to_string())));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_delete_non_key() {
        let mut tree = get_sample_tree();
        let before = tree.clone();
        assert_eq!(tree.delete(&16), Err(Error::KeyNotFound("16".to_string())));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_delete_root_two_children() {
        let mut tree = AvlTree::new();
        for key in 1..=7 {
            tree.insert(key, "").unwrap();
        }
        assert_eq!(tree.root().unwrap().key, 4);

        tree.delete(&4).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.key, 5);
        assert_eq!(root.right_count(), 2);
        assert!(root.right().unwrap().left().is_none());
        check_subtree(tree.root());
    }

    #[test]
    fn test_delete_to_empty() {
        let mut tree = get_sample_tree();
        for key in [15, 3, 22, 10, 4, 20, 5, 17] {
            tree.delete(&key).unwrap();
            check_subtree(tree.root());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree, AvlTree::new());
    }

    #[test]
    fn test_sequential_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for key in 0..1024 {
            tree.insert(key, "").unwrap();
            check_subtree(tree.root());
        }
        assert_eq!(tree.height(), 10);
        assert_eq!(tree.kth_largest(1).unwrap().key, 1023);
        assert_eq!(tree.kth_largest(1024).unwrap().key, 0);
    }

    #[test]
    fn test_insert_then_delete_restores_shape() {
        let mut tree = get_sample_tree();
        let before = tree.clone();
        tree.insert(11, "new").unwrap();
        tree.delete(&11).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut tree = get_sample_tree();
        assert_eq!(tree.get(&17), Ok(&"D"));
        *tree.get_mut(&17).unwrap() = "d";
        assert_eq!(tree.get(&17), Ok(&"d"));
        assert_eq!(tree.get(&18), Err(Error::KeyNotFound("18".to_string())));
        assert_eq!(tree.min(), Some((&3, &"F")));
        assert_eq!(tree.max(), Some((&22, &"H")));
    }

    #[test]
    fn test_iter_in_order() {
        let tree = get_sample_tree();
        let pairs: Vec<(i32, &str)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            pairs,
            vec![(3, "F"), (4, "G"), (5, "E"), (10, "B"), (15, "A"), (17, "D"), (20, "C"), (22, "H")]
        );
    }
}
