//! Tree Store CRUD surface over the persisted collections document.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use quiver_domain::{
    CollectionSettings, CollectionTree, CollectionsConfig, HttpRequest, TreeResult,
};

use crate::error::ApplicationResult;
use crate::ports::{Clock, ConfigStore};

/// The Tree Store mutation surface.
///
/// Every operation is bracketed by a whole-document read and write against
/// the configured storage location.
pub struct CollectionService<S, C> {
    store: S,
    clock: C,
    path: PathBuf,
}

impl<S: ConfigStore, C: Clock> CollectionService<S, C> {
    /// Creates a service bound to one collections document.
    pub fn new(store: S, clock: C, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            clock,
            path: path.into(),
        }
    }

    /// Loads the current document snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails with a genuine I/O problem.
    pub async fn load(&self) -> ApplicationResult<CollectionsConfig> {
        Ok(self.store.load_collections(&self.path).await?)
    }

    async fn mutate<T, F>(&self, op: F) -> ApplicationResult<T>
    where
        F: FnOnce(&mut CollectionTree, DateTime<Utc>) -> TreeResult<T>,
    {
        let config = self.store.load_collections(&self.path).await?;
        let mut tree = CollectionTree::from_config(config);
        let value = op(&mut tree, self.clock.now())?;
        self.store
            .save_collections(&self.path, &tree.into_config())
            .await?;
        Ok(value)
    }

    /// Creates a collection and returns its id.
    ///
    /// # Errors
    ///
    /// Propagates `NotFound` / `InvalidStructure` / `DuplicateName` from
    /// the tree, and storage errors from the bracket.
    pub async fn create_collection(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> ApplicationResult<String> {
        self.mutate(|tree, now| tree.create_collection(name, parent_id, now))
            .await
    }

    /// Creates or updates a request node and returns its id.
    ///
    /// # Errors
    ///
    /// Propagates tree validation errors and storage errors.
    pub async fn save_request(
        &self,
        name: &str,
        request: HttpRequest,
        parent_id: Option<&str>,
        existing_id: Option<&str>,
    ) -> ApplicationResult<String> {
        self.mutate(|tree, now| tree.save_request(name, request, parent_id, existing_id, now))
            .await
    }

    /// Replaces a collection's settings.
    ///
    /// # Errors
    ///
    /// Propagates tree validation errors and storage errors.
    pub async fn update_settings(
        &self,
        id: &str,
        settings: Option<CollectionSettings>,
    ) -> ApplicationResult<()> {
        self.mutate(|tree, now| tree.set_settings(id, settings, now))
            .await
    }

    /// Deletes a node (and its subtree). Returns whether a node was found.
    ///
    /// # Errors
    ///
    /// Returns only storage errors; a missing node is not an error.
    pub async fn delete_node(&self, id: &str) -> ApplicationResult<bool> {
        self.mutate(|tree, _now| Ok(tree.delete_node(id))).await
    }

    /// Renames a node.
    ///
    /// # Errors
    ///
    /// Propagates tree validation errors and storage errors.
    pub async fn rename_node(&self, id: &str, new_name: &str) -> ApplicationResult<()> {
        self.mutate(|tree, now| tree.rename_node(id, new_name, now))
            .await
    }

    /// Moves a node under a new parent (or to the root).
    ///
    /// # Errors
    ///
    /// Propagates tree validation errors (including `CyclicMove`) and
    /// storage errors.
    pub async fn move_node(&self, id: &str, new_parent_id: Option<&str>) -> ApplicationResult<()> {
        self.mutate(|tree, now| tree.move_node(id, new_parent_id, now))
            .await
    }
}
