//! Document store port.

use std::future::Future;
use std::path::Path;

use quiver_domain::{CollectionsConfig, EnvironmentsConfig};

/// Errors raised by document persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure on the write path.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for whole-document persistence of the engine's two documents,
/// keyed by a caller-supplied storage location.
///
/// Loads never fail on a missing document: implementations return the empty
/// default. A malformed document degrades the same way (the adapter logs
/// it), so a corrupt local file never blocks the user.
pub trait ConfigStore: Send + Sync {
    /// Loads the collections document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than a missing file.
    fn load_collections(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<CollectionsConfig, StorageError>> + Send;

    /// Saves the collections document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    fn save_collections(
        &self,
        path: &Path,
        config: &CollectionsConfig,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Loads the environments document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than a missing file.
    fn load_environments(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<EnvironmentsConfig, StorageError>> + Send;

    /// Saves the environments document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    fn save_environments(
        &self,
        path: &Path,
        config: &EnvironmentsConfig,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
