//! Shared constants used across Cuepad crates.

/// Default maximum number of entries retained by a history log.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default upper bound on total history text bytes.
pub const DEFAULT_HISTORY_MAX_BYTES: usize = 4 * 1024 * 1024;

/// Default coalescing window for rapid consecutive edits, in milliseconds.
pub const DEFAULT_COALESCE_WINDOW_MS: u64 = 750;

/// Default character-distance threshold below which edits coalesce.
pub const DEFAULT_COALESCE_DISTANCE: usize = 16;

/// Default maximum script size accepted by the session, in bytes.
pub const DEFAULT_MAX_SCRIPT_SIZE: usize = 1024 * 1024;

/// Editor font size clamp range, in pixels.
pub const MIN_FONT_SIZE: u32 = 2;
/// Upper bound of the font size clamp range.
pub const MAX_FONT_SIZE: u32 = 120;

/// Sidebar width clamp range, in pixels.
pub const MIN_SIDEBAR_WIDTH: u32 = 150;
/// Upper bound of the sidebar width clamp range.
pub const MAX_SIDEBAR_WIDTH: u32 = 400;

/// UI scale factor clamp range.
pub const MIN_UI_SCALE: f32 = 0.7;
/// Upper bound of the UI scale clamp range.
pub const MAX_UI_SCALE: f32 = 1.5;

/// Default editor font family.
pub const DEFAULT_FONT_FAMILY: &str = "monospace";
/// Default editor font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 12;
/// Default sidebar width in pixels.
pub const DEFAULT_SIDEBAR_WIDTH: u32 = 220;
/// Default UI scale factor.
pub const DEFAULT_UI_SCALE: f32 = 1.0;

/// Compiled-in starter script shown before any document is loaded.
pub const DEFAULT_SCRIPT: &str = "\
[Alice] Welcome to the cue editor.
[pause:0.6]
[Bob] Tags, punctuation, and cue timings are highlighted as you type.

1
00:00:01,000 --> 00:00:03,500
Subtitle blocks are recognized too.
";
