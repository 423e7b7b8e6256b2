//! Generic containers: a dynamic array with amortized doubling growth and an
//! unbalanced binary search tree with an explicit-stack in-order iterator.
//!
//! Layers, innermost first:
//! - [`domain`]: the containers and their errors, no I/O
//! - [`application`]: errors shared by configuration and the front end
//! - [`config`]: layered settings for the command-line front end
//! - [`cli`]: argument parsing, dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{ContainerError, ContainerResult, DynamicArray, OrderedTree};
