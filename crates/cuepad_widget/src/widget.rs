//! The embeddable tag-editor widget.
//!
//! Wires an [`EditorSession`], a rendering [`Surface`], and an optional
//! [`SessionStore`] together behind the small contract a host needs: a value
//! accessor/setter pair, a configure hook for the host's saved document, and
//! undo/redo. All persistence is fire-and-forget: a failed write is logged
//! and never disturbs the in-memory session.

use crate::key::storage_key;
use cuepad_core::{Config, SessionStore};
use cuepad_editor::{rerender, EditorSession, RenderOutcome, Surface};
use std::time::Instant;
use tracing::{error, warn};

/// One embedded editor instance.
pub struct TagEditorWidget {
    storage_key: String,
    session: EditorSession,
    surface: Surface,
    store: Option<SessionStore>,
    /// Set once the host pushed its saved-document value through
    /// [`configure`](Self::configure) or [`set_value`](Self::set_value);
    /// later `set_value` calls are ignored so host replays cannot clobber
    /// local edits.
    initial_value_applied: bool,
}

impl TagEditorWidget {
    /// Creates a widget, restoring any snapshot persisted under this
    /// identity.
    ///
    /// # Arguments
    /// - `store`: Snapshot store, or `None` for an ephemeral widget.
    /// - `stable_id`: Host-assigned identifier; minted when absent.
    /// - `config`: Session limits and history bounds.
    ///
    /// # Returns
    /// A widget showing the restored text, or the compiled-in default script
    /// when nothing usable was persisted.
    pub fn new(store: Option<SessionStore>, stable_id: Option<&str>, config: &Config) -> Self {
        let storage_key = storage_key(stable_id);
        let session = match store.as_ref().map(|s| s.load(&storage_key)) {
            Some(Ok(Some(snapshot))) => EditorSession::from_snapshot(&snapshot, config),
            Some(Ok(None)) | None => EditorSession::from_config(config),
            Some(Err(err)) => {
                warn!(
                    "Could not load snapshot for '{}', starting fresh: {}",
                    storage_key, err
                );
                EditorSession::from_config(config)
            }
        };
        let surface = Surface::from_text(session.text());
        Self {
            storage_key,
            session,
            surface,
            store,
            initial_value_applied: false,
        }
    }

    /// Returns the persistence key this widget writes under.
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_str()
    }

    /// Returns the session state (read-only).
    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Returns the rendering surface (read-only).
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the rendering surface for the host to apply input to.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Plain-text accessor: what the host saves into its document.
    ///
    /// # Returns
    /// The live surface's plain text.
    pub fn value(&self) -> String {
        self.surface.plain_text()
    }

    /// Host-side initial value push. Applies source precedence once:
    /// persisted custom text beats a default-valued workflow text, any other
    /// workflow text wins. Calls after the first applied value (or after
    /// [`configure`](Self::configure)) are ignored.
    pub fn set_value(&mut self, value: &str) {
        if self.initial_value_applied {
            return;
        }
        self.session.adopt_initial(Some(value), Instant::now());
        self.surface.reset_to_text(self.session.text());
        self.initial_value_applied = true;
        self.persist();
    }

    /// Programmatic setter: replaces the buffer and re-renders the surface.
    ///
    /// # Returns
    /// `false` when the text was rejected (size limit) and nothing changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if !self.session.set_text(text, Instant::now()) {
            return false;
        }
        self.surface.reset_to_text(self.session.text());
        self.persist();
        true
    }

    /// Reconciles the host's saved-document value (initial load and every
    /// reconfiguration). History resets only when the value actually changed
    /// since this widget last saw it.
    pub fn configure(&mut self, workflow_value: &str) {
        self.session.configure(workflow_value, Instant::now());
        self.surface.reset_to_text(self.session.text());
        self.initial_value_applied = true;
        self.persist();
    }

    /// Runs one render cycle after the host applied an input event to the
    /// surface, then checkpoints and persists the result.
    ///
    /// An edit the session rejects (size limit) rolls the surface back to
    /// the last accepted text.
    ///
    /// # Returns
    /// Whether the surface markup changed.
    pub fn on_input(&mut self) -> RenderOutcome {
        let outcome = rerender(&mut self.surface);
        let caret = self.surface.caret_offset().unwrap_or(0);
        let text = self.surface.plain_text();
        if !self.session.apply_edit(&text, caret, Instant::now()) {
            self.surface.reset_to_text(self.session.text());
            return RenderOutcome::Updated;
        }
        self.persist();
        outcome
    }

    /// Splices a snippet (a tag, a preset block) at the caret, or at the end
    /// of the document when there is no selection.
    ///
    /// # Returns
    /// `true` when the snippet was accepted.
    pub fn insert_snippet(&mut self, snippet: &str) -> bool {
        let caret = self
            .surface
            .caret_offset()
            .unwrap_or_else(|| self.surface.tree().len_chars());
        let Some(new_caret) = self.session.insert_at_caret(snippet, caret, Instant::now()) else {
            return false;
        };
        self.surface.reset_to_text(self.session.text());
        self.surface.set_caret_offset(new_caret);
        self.persist();
        true
    }

    /// Steps the widget back one checkpoint.
    ///
    /// # Returns
    /// `true` when an entry was applied; `false` leaves everything in place.
    pub fn undo(&mut self) -> bool {
        let Some(caret) = self.session.undo() else {
            return false;
        };
        self.surface.reset_to_text(self.session.text());
        self.surface.set_caret_offset(caret);
        self.persist();
        true
    }

    /// Steps the widget forward one checkpoint.
    ///
    /// # Returns
    /// `true` when an entry was applied.
    pub fn redo(&mut self) -> bool {
        let Some(caret) = self.session.redo() else {
            return false;
        };
        self.surface.reset_to_text(self.session.text());
        self.surface.set_caret_offset(caret);
        self.persist();
        true
    }

    /// Human-readable undo position for the host's history display.
    pub fn history_status(&self) -> String {
        self.session.history_status()
    }

    /// Sets the editor font family and persists the preference.
    pub fn set_font_family(&mut self, family: &str) {
        self.session.preferences_mut().set_font_family(family);
        self.persist();
    }

    /// Sets the editor font size (clamped) and persists the preference.
    pub fn set_font_size(&mut self, size: u32) {
        self.session.preferences_mut().set_font_size(size);
        self.persist();
    }

    /// Sets the sidebar width (clamped) and persists the preference.
    pub fn set_sidebar_width(&mut self, width: u32) {
        self.session.preferences_mut().set_sidebar_width(width);
        self.persist();
    }

    /// Sets the UI scale (clamped) and persists the preference.
    pub fn set_ui_scale(&mut self, scale: f32) {
        self.session.preferences_mut().set_ui_scale(scale);
        self.persist();
    }

    /// Final snapshot write when the host removes the widget.
    pub fn teardown(&self) {
        self.persist();
    }

    fn persist(&self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(err) = store.save(&self.storage_key, &self.session.snapshot()) {
            error!("Failed to persist session '{}': {}", self.storage_key, err);
        }
    }
}
