//! Environment operations over the persisted environments document.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use quiver_domain::{Environment, EnvironmentVariable, EnvironmentsConfig};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, ConfigStore};

/// CRUD and activation surface for environments.
///
/// The active environment is recorded only as a field of the persisted
/// document; resolution receives it as an explicit argument, never as
/// ambient state.
pub struct EnvironmentService<S, C> {
    store: S,
    clock: C,
    path: PathBuf,
}

impl<S: ConfigStore, C: Clock> EnvironmentService<S, C> {
    /// Creates a service bound to one environments document.
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
    pub async fn load(&self) -> ApplicationResult<EnvironmentsConfig> {
        Ok(self.store.load_environments(&self.path).await?)
    }

    async fn mutate<T, F>(&self, op: F) -> ApplicationResult<T>
    where
        F: FnOnce(&mut EnvironmentsConfig, DateTime<Utc>) -> ApplicationResult<T>,
    {
        let mut config = self.store.load_environments(&self.path).await?;
        let value = op(&mut config, self.clock.now())?;
        self.store.save_environments(&self.path, &config).await?;
        Ok(value)
    }

    /// Creates an environment and returns its id.
    ///
    /// # Errors
    ///
    /// `DuplicateName` when an environment with this name already exists.
    pub async fn create_environment(&self, name: &str) -> ApplicationResult<String> {
        self.mutate(|config, now| {
            if config.environments.iter().any(|e| e.name == name) {
                return Err(ApplicationError::DuplicateName(name.to_string()));
            }
            let environment = Environment::new(name, now);
            let id = environment.id.clone();
            config.environments.push(environment);
            Ok(id)
        })
        .await
    }

    /// Renames an environment.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown, `DuplicateName` when another
    /// environment already uses the name.
    pub async fn rename_environment(&self, id: &str, new_name: &str) -> ApplicationResult<()> {
        self.mutate(|config, now| {
            if config
                .environments
                .iter()
                .any(|e| e.id != id && e.name == new_name)
            {
                return Err(ApplicationError::DuplicateName(new_name.to_string()));
            }
            let environment = config
                .environment_mut(id)
                .ok_or_else(|| ApplicationError::NotFound(id.to_string()))?;
            environment.name = new_name.to_string();
            environment.updated_at = now;
            Ok(())
        })
        .await
    }

    /// Deletes an environment. Returns whether one was found.
    ///
    /// Clears the active-environment pointer when it referenced the
    /// deleted environment.
    ///
    /// # Errors
    ///
    /// Returns only storage errors; a missing id is not an error.
    pub async fn delete_environment(&self, id: &str) -> ApplicationResult<bool> {
        self.mutate(|config, _now| {
            let before = config.environments.len();
            config.environments.retain(|e| e.id != id);
            let found = config.environments.len() != before;
            if found && config.active_environment_id.as_deref() == Some(id) {
                config.active_environment_id = None;
            }
            Ok(found)
        })
        .await
    }

    /// Sets (or clears, with `None`) the active environment.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown.
    pub async fn set_active_environment(&self, id: Option<&str>) -> ApplicationResult<()> {
        self.mutate(|config, _now| {
            if let Some(id) = id
                && config.environment(id).is_none()
            {
                return Err(ApplicationError::NotFound(id.to_string()));
            }
            config.active_environment_id = id.map(str::to_string);
            Ok(())
        })
        .await
    }

    /// Replaces an environment's ordered variable list.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown.
    pub async fn set_environment_variables(
        &self,
        id: &str,
        variables: Vec<EnvironmentVariable>,
    ) -> ApplicationResult<()> {
        self.mutate(|config, now| {
            let environment = config
                .environment_mut(id)
                .ok_or_else(|| ApplicationError::NotFound(id.to_string()))?;
            environment.variables = variables;
            environment.updated_at = now;
            Ok(())
        })
        .await
    }
}
