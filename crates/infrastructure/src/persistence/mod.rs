//! Whole-document persistence adapters.

mod config_store;

pub use config_store::JsonFileConfigStore;
