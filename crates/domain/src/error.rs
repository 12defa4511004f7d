//! Tree mutation errors.

use thiserror::Error;

/// Structural errors raised by collection tree mutations.
///
/// Every variant is a precondition violation surfaced synchronously to the
/// immediate caller; none is transient and none is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced node or parent id does not exist.
    #[error("node not found: {0}")]
    NotFound(String),

    /// The target of the operation has the wrong node kind.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// A sibling with the same name already exists at the destination.
    #[error("a sibling named \"{0}\" already exists")]
    DuplicateName(String),

    /// The move would make a node its own descendant.
    #[error("cannot move node {0} into itself or its own subtree")]
    CyclicMove(String),
}

/// Result type alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
