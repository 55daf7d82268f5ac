//! Last-used settings, read at startup and written at game start.

pub mod snapshot;
pub mod store;

pub use snapshot::SettingsSnapshot;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
