//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_COALESCE_WINDOW_MS, DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_MAX_BYTES,
    DEFAULT_MAX_SCRIPT_SIZE,
};
use std::env;
use std::path::PathBuf;

/// Runtime configuration for Cuepad.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub history_capacity: usize,
    pub history_max_bytes: usize,
    pub coalesce_window_ms: u64,
    pub max_script_size: usize,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    // Fallback to current directory if available
    std::env::current_dir().ok()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("CUEPAD_DB_PATH")
                .map(expand_tilde)
                .unwrap_or_else(|_| {
                    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                    let cache_dir = home.join(".cache").join("cuepad");
                    cache_dir.join("db").to_string_lossy().to_string()
                }),
            history_capacity: env::var("CUEPAD_HISTORY_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_CAPACITY),
            history_max_bytes: env::var("CUEPAD_HISTORY_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_MAX_BYTES),
            coalesce_window_ms: env::var("CUEPAD_COALESCE_WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COALESCE_WINDOW_MS),
            max_script_size: env::var("CUEPAD_MAX_SCRIPT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SCRIPT_SIZE),
        }
    }
}
