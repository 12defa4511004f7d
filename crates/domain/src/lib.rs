//! Quiver Domain - Core data model
//!
//! This crate defines the persisted data model for the Quiver engine:
//! the collection forest, environments, and the request and auth types the
//! resolution pipeline operates on. All types here are pure Rust with no
//! I/O dependencies.

pub mod auth;
pub mod collection;
pub mod config;
pub mod environment;
pub mod error;
pub mod id;
pub mod key_value;
pub mod request;
pub mod tree;

pub use auth::{ApiKeyAuth, ApiKeyLocation, AuthConfig, AuthType, BasicAuth, BearerAuth};
pub use collection::{Collection, CollectionNode, CollectionSettings, FieldState, RequestNode};
pub use config::{CONFIG_VERSION, CollectionsConfig, EnvironmentsConfig};
pub use environment::{Environment, EnvironmentVariable};
pub use error::{TreeError, TreeResult};
pub use id::generate_id;
pub use key_value::KeyValuePair;
pub use request::{BodyType, HttpMethod, HttpRequest, RequestBody};
pub use tree::CollectionTree;
