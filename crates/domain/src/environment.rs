//! Environment and variable types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// A single environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    /// Variable name, referenced as `{{name}}`.
    pub key: String,
    /// Variable value.
    pub value: String,
}

impl EnvironmentVariable {
    /// Creates a new variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named set of variables, e.g. "development" or "production".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier.
    pub id: String,
    /// Environment name.
    pub name: String,
    /// Variables, in display order. Later entries shadow earlier ones with
    /// the same key.
    #[serde(default)]
    pub variables: Vec<EnvironmentVariable>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional dotenv file this environment was imported from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_file_path: Option<String>,
}

impl Environment {
    /// Creates a new empty environment with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            variables: Vec::new(),
            created_at: now,
            updated_at: now,
            env_file_path: None,
        }
    }

    /// Adds or replaces a variable by key (first match is replaced).
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.variables.iter_mut().find(|v| v.key == key) {
            Some(existing) => existing.value = value,
            None => self.variables.push(EnvironmentVariable { key, value }),
        }
    }

    /// Flattens the variable list into a lookup map.
    ///
    /// When the list defines the same key twice, the last definition wins.
    #[must_use]
    pub fn variable_map(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .map(|v| (v.key.clone(), v.value.clone()))
            .collect()
    }
}
