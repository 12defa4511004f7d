//! Collection tree node types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthConfig;
use crate::id::generate_id;
use crate::key_value::KeyValuePair;
use crate::request::HttpRequest;

/// Three-state view of an optional override field.
///
/// The persisted shape keeps plain options (`None` = unset, empty = cleared);
/// this projection makes the distinction explicit for merge and display
/// logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// No opinion at this level; inherit whatever an ancestor set.
    Unset,
    /// Explicitly cleared at this level.
    Cleared,
    /// Set to a concrete value at this level.
    Set,
}

/// Per-collection overrides inherited by every request beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSettings {
    /// Base URL prepended to request URLs within this collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Auth inherited by requests that do not set their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Headers shared by every request in this collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<KeyValuePair>>,

    /// Git remote this collection is shared through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_remote: Option<String>,

    /// When this collection was last synced with its remote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl CollectionSettings {
    /// State of the base URL override.
    #[must_use]
    pub fn base_url_state(&self) -> FieldState {
        match self.base_url.as_deref() {
            None => FieldState::Unset,
            Some(url) if url.trim().is_empty() => FieldState::Cleared,
            Some(_) => FieldState::Set,
        }
    }

    /// State of the shared-headers override.
    #[must_use]
    pub fn headers_state(&self) -> FieldState {
        match self.headers.as_deref() {
            None => FieldState::Unset,
            Some([]) => FieldState::Cleared,
            Some(_) => FieldState::Set,
        }
    }

    /// Returns true when no field carries an opinion.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.auth.is_none()
            && self.headers.is_none()
            && self.git_remote.is_none()
            && self.last_synced_at.is_none()
    }
}

/// A collection: a named, ordered group of child nodes with optional
/// shared settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier.
    pub id: String,
    /// Collection name; unique among its siblings.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Child nodes; order is display and iteration order.
    #[serde(default)]
    pub children: Vec<CollectionNode>,
    /// Shared settings, when this collection overrides anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CollectionSettings>,
}

impl Collection {
    /// Creates a new empty collection with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            children: Vec::new(),
            settings: None,
        }
    }

    /// Sets the collection settings.
    #[must_use]
    pub fn with_settings(mut self, settings: CollectionSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// A saved request definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNode {
    /// Unique identifier.
    pub id: String,
    /// Request name; unique among its siblings.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// The request definition.
    pub request: HttpRequest,
}

impl RequestNode {
    /// Creates a new request node with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, request: HttpRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            request,
        }
    }
}

/// A node in the collection forest: either a collection or a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollectionNode {
    /// A collection containing other nodes.
    Collection(Collection),
    /// A saved request.
    Request(RequestNode),
}

impl CollectionNode {
    /// Returns the id of this node.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Collection(c) => &c.id,
            Self::Request(r) => &r.id,
        }
    }

    /// Returns the name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Collection(c) => &c.name,
            Self::Request(r) => &r.name,
        }
    }

    /// Returns true for collection nodes.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Returns the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Collection(c) => c.updated_at,
            Self::Request(r) => r.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_collection_creation() {
        let collection = Collection::new("My API", now());
        assert_eq!(collection.name, "My API");
        assert!(collection.children.is_empty());
        assert!(collection.settings.is_none());
        assert_eq!(collection.created_at, collection.updated_at);
    }

    #[test]
    fn test_node_accessors() {
        let collection = CollectionNode::Collection(Collection::new("Users", now()));
        assert!(collection.is_collection());
        assert_eq!(collection.name(), "Users");

        let request = CollectionNode::Request(RequestNode::new(
            "Get Users",
            HttpRequest::new(HttpMethod::Get, "/users"),
            now(),
        ));
        assert!(!request.is_collection());
        assert_eq!(request.name(), "Get Users");
    }

    #[test]
    fn test_settings_field_states() {
        let unset = CollectionSettings::default();
        assert_eq!(unset.base_url_state(), FieldState::Unset);
        assert_eq!(unset.headers_state(), FieldState::Unset);
        assert!(unset.is_empty());

        let cleared = CollectionSettings {
            base_url: Some("  ".to_string()),
            headers: Some(Vec::new()),
            ..CollectionSettings::default()
        };
        assert_eq!(cleared.base_url_state(), FieldState::Cleared);
        assert_eq!(cleared.headers_state(), FieldState::Cleared);
        assert!(!cleared.is_empty());

        let set = CollectionSettings {
            base_url: Some("https://api.example.com".to_string()),
            headers: Some(vec![KeyValuePair::new("Accept", "application/json")]),
            ..CollectionSettings::default()
        };
        assert_eq!(set.base_url_state(), FieldState::Set);
        assert_eq!(set.headers_state(), FieldState::Set);
    }

    #[test]
    fn test_node_serde_tag() {
        let node = CollectionNode::Request(RequestNode::new(
            "Ping",
            HttpRequest::new(HttpMethod::Get, "/ping"),
            now(),
        ));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""type":"request""#));

        let back: CollectionNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
