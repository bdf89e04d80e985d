//! Persisted session models shared by the editor and widget crates.

use crate::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_SIDEBAR_WIDTH, DEFAULT_UI_SCALE, MAX_FONT_SIZE,
    MAX_SIDEBAR_WIDTH, MAX_UI_SCALE, MIN_FONT_SIZE, MIN_SIDEBAR_WIDTH, MIN_UI_SCALE,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// One undo/redo checkpoint: the full text plus the caret at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub caret: usize,
}

impl HistoryEntry {
    /// Create an entry with the caret clamped into the text's char range.
    ///
    /// # Returns
    /// A new [`HistoryEntry`] whose caret is a valid offset into `text`.
    pub fn new(text: String, caret: usize) -> Self {
        let caret = caret.min(text.chars().count());
        Self { text, caret }
    }
}

/// Scalar user preferences that share the persistence lifecycle but never
/// participate in undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    font_family: String,
    font_size: u32,
    sidebar_width: u32,
    ui_scale: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            ui_scale: DEFAULT_UI_SCALE,
        }
    }
}

impl Preferences {
    /// Returns the configured editor font family.
    pub fn font_family(&self) -> &str {
        self.font_family.as_str()
    }

    /// Returns the editor font size in pixels.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Returns the sidebar width in pixels.
    pub fn sidebar_width(&self) -> u32 {
        self.sidebar_width
    }

    /// Returns the UI scale factor.
    pub fn ui_scale(&self) -> f32 {
        self.ui_scale
    }

    /// Replaces the font family. Blank values fall back to the default.
    pub fn set_font_family(&mut self, family: &str) {
        let trimmed = family.trim();
        self.font_family = if trimmed.is_empty() {
            DEFAULT_FONT_FAMILY.to_string()
        } else {
            trimmed.to_string()
        };
    }

    /// Sets the font size, clamped to the supported pixel range.
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    /// Sets the sidebar width, clamped to the supported pixel range.
    pub fn set_sidebar_width(&mut self, width: u32) {
        self.sidebar_width = width.clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH);
    }

    /// Sets the UI scale, clamped to the supported factor range.
    pub fn set_ui_scale(&mut self, scale: f32) {
        self.ui_scale = scale.clamp(MIN_UI_SCALE, MAX_UI_SCALE);
    }
}

/// Serialized form of one editor session, as stored by the snapshot store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub text: String,
    pub history: Vec<HistoryEntry>,
    pub history_index: usize,
    pub preferences: Preferences,
    pub last_workflow_value: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// True when the snapshot carries a usable undo/redo timeline.
    ///
    /// # Returns
    /// `true` when at least one history entry is present and the stored index
    /// points inside the entry list.
    pub fn has_history(&self) -> bool {
        !self.history.is_empty() && self.history_index < self.history.len()
    }
}
