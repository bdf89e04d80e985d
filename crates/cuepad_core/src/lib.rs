//! Core domain library for Cuepad (config, persisted models, snapshot store).

/// Configuration loading and defaults.
pub mod config;
/// Shared defaults and clamp ranges.
pub mod constants;
/// Application error types (storage/domain).
pub mod error;
/// Persisted session models.
pub mod models;
/// Snapshot persistence layer.
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use models::{HistoryEntry, Preferences, SessionSnapshot};
pub use store::SessionStore;
