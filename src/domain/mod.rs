//! Domain layer: the containers
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod dynamic_array;
pub mod error;
pub mod ordered_tree;
pub mod tree_traits;

pub use dynamic_array::{DynamicArray, DEFAULT_CAPACITY};
pub use error::{ContainerError, ContainerResult};
pub use ordered_tree::{IterState, OrderedTree, TreeNode};
pub use tree_traits::TreeDisplay;
