//! Plugin settings: on-disk schema, persistence and the per-invocation
//! compiled snapshot.

pub mod schema;
pub mod snapshot;
pub mod store;

pub use schema::*;
pub use snapshot::*;
pub use store::{load_settings, resolve_settings_path, save_settings, SettingsError};
