pub type NodePtr<N> = Option<Box<N>>;

/// Read access shared by every binary tree node, so lookups, successor
/// search and in-order iteration are written once for both trees.
pub trait BinaryNode {
    type Key;
    type Value;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;

    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

///Plain binary search tree node
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: NodePtr<TreeNode<K, V>>,
    pub(crate) right: NodePtr<TreeNode<K, V>>,
}

impl<K, V> TreeNode<K, V> {
    pub fn new(key: K, value: V) -> TreeNode<K, V> {
        TreeNode {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

impl<K, V> BinaryNode for TreeNode<K, V> {
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.key
    }
    fn value(&self) -> &V {
        &self.value
    }
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }
    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// AVL tree node.
///
/// On top of the plain node it carries its `height` (edges on the longest
/// path down to a leaf, so a leaf is 0 and an empty subtree counts as -1)
/// and `right_count`, the number of nodes in its right subtree. Both are
/// only trustworthy between tree operations.
#[derive(Debug, Clone, PartialEq)]
pub struct AvlNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) height: usize,
    pub(crate) right_count: usize,
    pub(crate) left: NodePtr<AvlNode<K, V>>,
    pub(crate) right: NodePtr<AvlNode<K, V>>,
}

impl<K, V> AvlNode<K, V> {
    const NONE_HEIGHT: i32 = -1; //Height of children that are None

    ///Creates a new leaf
    pub fn new(key: K, value: V) -> AvlNode<K, V> {
        AvlNode {
            key,
            value,
            height: 0,
            right_count: 0,
            left: None,
            right: None,
        }
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn right_count(&self) -> usize {
        self.right_count
    }
    ///Height of a possibly empty subtree
    pub fn height_of(subtree: &NodePtr<AvlNode<K, V>>) -> i32 {
        subtree
            .as_ref()
            .map_or(Self::NONE_HEIGHT, |node| node.height as i32)
    }
    ///Right height minus left height, always derived from the children
    pub fn balance(&self) -> i32 {
        Self::height_of(&self.right) - Self::height_of(&self.left)
    }
    ///Readjusts height of node based on heights of its children
    pub(crate) fn recalc_height(&mut self) {
        let tallest = std::cmp::max(Self::height_of(&self.left), Self::height_of(&self.right));
        self.height = (tallest + 1) as usize;
    }
}

impl<K, V> BinaryNode for AvlNode<K, V> {
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.key
    }
    fn value(&self) -> &V {
        &self.value
    }
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }
    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}
