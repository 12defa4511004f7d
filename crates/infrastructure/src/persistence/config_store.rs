//! File-system backed `ConfigStore` implementation.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, warn};

use quiver_application::ports::{ConfigStore, StorageError};
use quiver_domain::{CollectionsConfig, EnvironmentsConfig};

use crate::serialization::{from_json, to_json_stable};

/// `ConfigStore` adapter backed by `tokio::fs`.
///
/// A missing document and a malformed document both degrade to the empty
/// default so a corrupt local file never blocks the user; the malformed
/// case is logged and never surfaced. Only genuine I/O failures and
/// write-path serialization failures return errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileConfigStore;

impl JsonFileConfigStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn load_document<T: DeserializeOwned + Default>(
        path: &Path,
        kind: &str,
    ) -> Result<T, StorageError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), kind, "document missing, starting empty");
                return Ok(T::default());
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        match from_json(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %path.display(), kind, error = %e, "malformed document, starting empty");
                Ok(T::default())
            }
        }
    }

    async fn save_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
        let json =
            to_json_stable(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, json).await?;
        Ok(())
    }
}

impl ConfigStore for JsonFileConfigStore {
    async fn load_collections(&self, path: &Path) -> Result<CollectionsConfig, StorageError> {
        Self::load_document(path, "collections").await
    }

    async fn save_collections(
        &self,
        path: &Path,
        config: &CollectionsConfig,
    ) -> Result<(), StorageError> {
        Self::save_document(path, config).await
    }

    async fn load_environments(&self, path: &Path) -> Result<EnvironmentsConfig, StorageError> {
        Self::load_document(path, "environments").await
    }

    async fn save_environments(
        &self,
        path: &Path,
        config: &EnvironmentsConfig,
    ) -> Result<(), StorageError> {
        Self::save_document(path, config).await
    }
}
