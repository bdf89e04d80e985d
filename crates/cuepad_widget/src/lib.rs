//! Host-integration glue: turns the headless editor core into a widget a
//! host application can embed, persist, and feed its saved-document value.

/// Storage-key minting.
pub mod key;
/// The embeddable editor widget.
pub mod widget;

pub use key::storage_key;
pub use widget::TagEditorWidget;
