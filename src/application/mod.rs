//! Application layer: errors shared by configuration and the front end
//!
//! Wraps domain errors with application-level context.

pub mod error;

pub use error::{ApplicationError, ApplicationResult};
