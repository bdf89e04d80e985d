//! Editor session state: live buffer, history, preferences, host
//! reconciliation, and snapshot round-tripping.

use crate::history::HistoryLog;
use chrono::Utc;
use cuepad_core::constants::{DEFAULT_MAX_SCRIPT_SIZE, DEFAULT_SCRIPT};
use cuepad_core::models::{Preferences, SessionSnapshot};
use cuepad_core::Config;
use std::time::{Duration, Instant};
use tracing::warn;

/// One editor instance's state.
///
/// Owns exactly one plain-text buffer (the single source of truth), one
/// history log, and the user preferences that share the persistence lifecycle
/// without ever entering undo/redo.
#[derive(Debug)]
pub struct EditorSession {
    text: String,
    history: HistoryLog,
    preferences: Preferences,
    last_workflow_value: Option<String>,
    default_text: String,
    max_script_size: usize,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Creates a session holding the compiled-in starter script, with the
    /// history seeded so the starter text is itself an undo target.
    pub fn new() -> Self {
        let mut history = HistoryLog::default();
        history.checkpoint(DEFAULT_SCRIPT, 0, Instant::now());
        Self {
            text: DEFAULT_SCRIPT.to_string(),
            history,
            preferences: Preferences::default(),
            last_workflow_value: None,
            default_text: DEFAULT_SCRIPT.to_string(),
            max_script_size: DEFAULT_MAX_SCRIPT_SIZE,
        }
    }

    /// Creates a session with history bounds and size limits from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut history = HistoryLog::with_limits(config.history_capacity, config.history_max_bytes);
        history.set_coalescing(
            Duration::from_millis(config.coalesce_window_ms),
            cuepad_core::constants::DEFAULT_COALESCE_DISTANCE,
        );
        history.checkpoint(DEFAULT_SCRIPT, 0, Instant::now());
        Self {
            text: DEFAULT_SCRIPT.to_string(),
            history,
            preferences: Preferences::default(),
            last_workflow_value: None,
            default_text: DEFAULT_SCRIPT.to_string(),
            max_script_size: config.max_script_size,
        }
    }

    /// Restores a session from a persisted snapshot, clamping the stored
    /// history index into range.
    pub fn from_snapshot(snapshot: &SessionSnapshot, config: &Config) -> Self {
        let mut history = HistoryLog::from_parts(
            snapshot.history.clone(),
            snapshot.history_index,
            config.history_capacity,
            config.history_max_bytes,
        );
        history.set_coalescing(
            Duration::from_millis(config.coalesce_window_ms),
            cuepad_core::constants::DEFAULT_COALESCE_DISTANCE,
        );
        if history.is_empty() {
            history.checkpoint(&snapshot.text, 0, Instant::now());
        }
        Self {
            text: snapshot.text.clone(),
            history,
            preferences: snapshot.preferences.clone(),
            last_workflow_value: snapshot.last_workflow_value.clone(),
            default_text: DEFAULT_SCRIPT.to_string(),
            max_script_size: config.max_script_size,
        }
    }

    /// Returns the current plain text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns the compiled-in default script.
    pub fn default_text(&self) -> &str {
        self.default_text.as_str()
    }

    /// Returns the history log (read-only).
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Human-readable undo position, e.g. `3/7`.
    pub fn history_status(&self) -> String {
        format!("{}/{}", self.history.index() + 1, self.history.len().max(1))
    }

    /// Returns the user preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Returns the user preferences for mutation. Preference changes never
    /// enter the history log.
    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    /// Returns the last workflow value observed by [`configure`](Self::configure).
    pub fn last_workflow_value(&self) -> Option<&str> {
        self.last_workflow_value.as_deref()
    }

    fn accepts(&self, text: &str) -> bool {
        if text.len() > self.max_script_size {
            warn!(
                "Rejecting edit of {} bytes (limit {})",
                text.len(),
                self.max_script_size
            );
            return false;
        }
        true
    }

    /// Accepts an edited text from the render cycle, checkpointing per the
    /// coalescing policy.
    ///
    /// # Returns
    /// `false` when the edit was rejected (size limit) and the buffer kept
    /// its previous value.
    pub fn apply_edit(&mut self, text: &str, caret: usize, at: Instant) -> bool {
        if !self.accepts(text) {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        self.history.checkpoint(text, caret, at);
        true
    }

    /// Programmatic setter: replaces the buffer. The caller re-renders its
    /// surface afterwards.
    ///
    /// # Returns
    /// `false` when the text was rejected (size limit).
    pub fn set_text(&mut self, text: &str, at: Instant) -> bool {
        self.apply_edit(text, 0, at)
    }

    /// Splices a snippet into the buffer at a caret offset (clamped to the
    /// text length), checkpointing the result.
    ///
    /// # Returns
    /// The caret offset just past the inserted snippet, or `None` when the
    /// resulting text was rejected.
    pub fn insert_at_caret(&mut self, snippet: &str, caret: usize, at: Instant) -> Option<usize> {
        let char_len = self.text.chars().count();
        let caret = caret.min(char_len);
        let byte_pos = self
            .text
            .char_indices()
            .nth(caret)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len());

        let mut next = self.text.clone();
        next.insert_str(byte_pos, snippet);
        let new_caret = caret + snippet.chars().count();
        if !self.apply_edit(&next, new_caret, at) {
            return None;
        }
        Some(new_caret)
    }

    /// Steps the buffer back one checkpoint.
    ///
    /// # Returns
    /// The caret offset recorded with the restored entry, or `None` when
    /// there is nothing to undo (the buffer is untouched).
    pub fn undo(&mut self) -> Option<usize> {
        let entry = self.history.undo()?;
        self.text = entry.text;
        Some(entry.caret)
    }

    /// Steps the buffer forward one checkpoint.
    ///
    /// # Returns
    /// The caret offset recorded with the restored entry, or `None` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<usize> {
        let entry = self.history.redo()?;
        self.text = entry.text;
        Some(entry.caret)
    }

    /// True when the session carries edits beyond a single default-text
    /// history seed.
    fn has_local_history(&self) -> bool {
        self.history.len() > 1
            || self
                .history
                .current()
                .is_some_and(|entry| entry.text != self.default_text)
    }

    /// Reconciles the host's saved document against this session.
    ///
    /// The history reset is keyed on whether `workflow` differs from the last
    /// value this session observed, never on how many times the host has
    /// called this. An unchanged value (host reload) preserves the local
    /// timeline; a changed value (different document opened) resets it.
    pub fn configure(&mut self, workflow: &str, at: Instant) {
        match self.last_workflow_value.as_deref() {
            Some(last) if last == workflow => {
                self.text.clear();
                self.text.push_str(workflow);
            }
            Some(_) => {
                self.text.clear();
                self.text.push_str(workflow);
                self.history.reset_to(workflow, 0, at);
            }
            None => {
                self.text.clear();
                self.text.push_str(workflow);
                if !self.has_local_history() {
                    self.history.reset_to(workflow, 0, at);
                }
            }
        }
        self.last_workflow_value = Some(workflow.to_string());
    }

    /// Chooses the initial text when the widget first materializes, before
    /// any configure call: persisted custom text wins over a workflow value
    /// that equals the compiled-in default; otherwise a custom workflow value
    /// wins; otherwise the default stays.
    pub fn adopt_initial(&mut self, workflow: Option<&str>, at: Instant) {
        let Some(workflow) = workflow else {
            return;
        };
        if workflow.is_empty() || workflow == self.default_text {
            return;
        }
        if self.text != workflow {
            self.text.clear();
            self.text.push_str(workflow);
            self.history.reset_to(workflow, 0, at);
        }
    }

    /// Captures the session as a persistable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            text: self.text.clone(),
            history: self.history.entries().to_vec(),
            history_index: self.history.index(),
            preferences: self.preferences.clone(),
            last_workflow_value: self.last_workflow_value.clone(),
            saved_at: Utc::now(),
        }
    }
}
