pub mod avl;
pub mod bst;
pub mod linear_probe_table;
pub mod node;
