//! Order-statistics AVL tree and linear-probing string table, plus the
//! potion trading simulation built on them.

pub mod config;
pub mod data_structures;
pub mod error;
pub mod trading;
pub mod util;

pub use config::{HashVariant, TableConfig};
pub use data_structures::avl::AvlTree;
pub use data_structures::bst::BinarySearchTree;
pub use data_structures::linear_probe_table::LinearProbeTable;
pub use data_structures::node::{AvlNode, BinaryNode, TreeNode};
pub use error::{Error, Result};
pub use util::hash::{HashFn, KeyHasher};
pub use util::random_gen::RandomGen;
