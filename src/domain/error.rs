//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Container errors are caller misuse, never operational failures.
/// Both are recoverable; the container is unchanged after either.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// `index` is wide enough to hold any `usize` or `i64` the caller passed.
    #[error("index {index} out of range for size {size}")]
    OutOfRange { index: i128, size: usize },

    #[error("no more elements in traversal")]
    EndOfIteration,
}

/// Result type for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;
