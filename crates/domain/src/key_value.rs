//! Key-value primitives shared by headers, query parameters, and
//! collection-settings headers.

use serde::{Deserialize, Serialize};

/// A key-value pair with an enabled flag.
///
/// Disabled pairs survive merging and variable substitution so the user can
/// toggle them back on later; only the transport layer excludes them from
/// the wire request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    /// The header or parameter name.
    pub key: String,
    /// The value.
    pub value: String,
    /// Whether this pair participates in the final wire request.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl KeyValuePair {
    /// Creates a new enabled pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled pair.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }
}
