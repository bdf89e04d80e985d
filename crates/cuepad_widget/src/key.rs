//! Storage-key minting for widget instances.

use std::sync::atomic::{AtomicU64, Ordering};

const STORAGE_KEY_PREFIX: &str = "cuepad_tag_editor";

// Fallback counter for hosts that have not assigned a stable id yet.
static WIDGET_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Builds the persistence key for one widget instance.
///
/// Hosts that track a stable identifier pass it in so the same document maps
/// to the same key across runs. Without one, a process-lifetime counter keeps
/// concurrently created widgets from clobbering each other's snapshots (such
/// keys do not survive a restart, which matches hosts that assign real ids
/// shortly after creation).
///
/// # Returns
/// The storage key for [`cuepad_core::SessionStore`] operations.
pub fn storage_key(stable_id: Option<&str>) -> String {
    match stable_id.map(str::trim) {
        Some(id) if !id.is_empty() => format!("{STORAGE_KEY_PREFIX}_{id}"),
        _ => {
            let minted = WIDGET_COUNTER.fetch_add(1, Ordering::Relaxed);
            format!("{STORAGE_KEY_PREFIX}_widget_{minted}")
        }
    }
}
