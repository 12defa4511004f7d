//! Quiver Infrastructure - adapters
//!
//! File-system persistence for the engine's two documents, deterministic
//! JSON serialization, and the system clock adapter.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::SystemClock;
pub use persistence::JsonFileConfigStore;
pub use serialization::{SerializationError, from_json, to_json_stable};
