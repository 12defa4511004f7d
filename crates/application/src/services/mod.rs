//! Document-bracketed services.
//!
//! Each operation reads the full persisted document, mutates an in-memory
//! copy, and writes the full document back. Validation happens before the
//! write, so a failed operation leaves the document untouched. The services
//! perform no locking; hosts exposing them to concurrent callers must
//! serialize mutations per document.

mod collections;
mod environments;

pub use collections::CollectionService;
pub use environments::EnvironmentService;
