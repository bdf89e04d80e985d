//! Headless editing core for tag-annotated dialogue and subtitle scripts.
//!
//! Plain text is the single source of truth. Every accepted edit re-tokenizes
//! the whole text into a decorated markup tree, and the caret is carried
//! across that rebuild as a plain-text character offset so the cursor never
//! visibly jumps.

/// Caret mapping between markup trees and plain-text offsets.
pub mod caret;
/// Regex-driven token highlighting.
pub mod highlight;
/// Coalescing undo/redo history.
pub mod history;
/// Decorated markup tree over plain text.
pub mod markup;
/// Caret-stable render cycle.
pub mod render;
/// Editor session state and host reconciliation.
pub mod session;

pub use caret::{measure_offset, place_caret, CaretPoint};
pub use highlight::highlight;
pub use history::HistoryLog;
pub use markup::{MarkupTree, NodeId, SpanCategory};
pub use render::{rerender, RenderOutcome, Surface};
pub use session::EditorSession;
