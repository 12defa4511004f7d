//! Persisted root documents.
//!
//! The engine owns exactly two documents: the collection forest and the
//! environment list. Each is read and written whole; there is no node-level
//! persistence.

use serde::{Deserialize, Serialize};

use crate::collection::CollectionNode;
use crate::environment::Environment;

/// Document format version written by this engine.
pub const CONFIG_VERSION: &str = "1.0.0";

/// Root document holding the collection forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsConfig {
    /// Format version for forward migration.
    pub version: String,
    /// Root-level nodes, in display order.
    #[serde(default)]
    pub collections: Vec<CollectionNode>,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            collections: Vec::new(),
        }
    }
}

/// Root document holding all environments and the active-environment pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentsConfig {
    /// Format version for forward migration.
    pub version: String,
    /// All stored environments, in display order.
    #[serde(default)]
    pub environments: Vec<Environment>,
    /// Id of the single active environment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_environment_id: Option<String>,
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            environments: Vec::new(),
            active_environment_id: None,
        }
    }
}

impl EnvironmentsConfig {
    /// Looks up an environment by id.
    #[must_use]
    pub fn environment(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == id)
    }

    /// Mutable lookup by id.
    pub fn environment_mut(&mut self, id: &str) -> Option<&mut Environment> {
        self.environments.iter_mut().find(|e| e.id == id)
    }

    /// Returns the active environment, if one is set and still exists.
    #[must_use]
    pub fn active_environment(&self) -> Option<&Environment> {
        self.active_environment_id
            .as_deref()
            .and_then(|id| self.environment(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_defaults_are_empty() {
        let collections = CollectionsConfig::default();
        assert_eq!(collections.version, CONFIG_VERSION);
        assert!(collections.collections.is_empty());

        let environments = EnvironmentsConfig::default();
        assert_eq!(environments.version, CONFIG_VERSION);
        assert!(environments.environments.is_empty());
        assert!(environments.active_environment_id.is_none());
    }

    #[test]
    fn test_active_environment_lookup() {
        let mut config = EnvironmentsConfig::default();
        let env = Environment::new("dev", Utc::now());
        let id = env.id.clone();
        config.environments.push(env);

        assert!(config.active_environment().is_none());

        config.active_environment_id = Some(id.clone());
        assert_eq!(config.active_environment().unwrap().id, id);

        // A dangling pointer yields no active environment.
        config.active_environment_id = Some("missing".to_string());
        assert!(config.active_environment().is_none());
    }
}
