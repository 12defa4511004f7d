//! Application error types

use thiserror::Error;

use quiver_domain::TreeError;

use crate::ports::StorageError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A structural invariant was violated by a tree mutation.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Document persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The referenced environment was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An environment with this name already exists.
    #[error("an environment named \"{0}\" already exists")]
    DuplicateName(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
