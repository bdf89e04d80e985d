//! Caret-stable render cycle over an editable surface.
//!
//! A [`Surface`] is the headless stand-in for a live editable region plus its
//! selection object: it owns the current markup tree (which a host mutates in
//! place as the user types) and at most one zero-width selection point.

use crate::caret::{measure_offset, place_caret, CaretPoint};
use crate::highlight::highlight;
use crate::markup::{MarkupTree, NodeId};
use std::ops::Range;
use tracing::trace;

/// Result of one render cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The recomputed markup was byte-identical; the live tree was not
    /// touched and the selection is exactly as the host left it.
    Unchanged,
    /// The live tree was replaced and the caret restored at its plain-text
    /// offset.
    Updated,
}

/// Live markup tree plus selection state.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    tree: MarkupTree,
    selection: Option<CaretPoint>,
}

impl Surface {
    /// Builds a surface rendering `text`, with no selection.
    pub fn from_text(text: &str) -> Self {
        Self {
            tree: highlight(text),
            selection: None,
        }
    }

    /// Returns the live tree.
    pub fn tree(&self) -> &MarkupTree {
        &self.tree
    }

    /// Returns the current selection point, if any.
    pub fn selection(&self) -> Option<CaretPoint> {
        self.selection
    }

    /// Extracts the plain text currently shown by the surface.
    pub fn plain_text(&self) -> String {
        self.tree.plain_text()
    }

    /// Serializes the live tree to markup.
    pub fn markup(&self) -> String {
        self.tree.serialize()
    }

    /// Places the selection at a point, validating it against the live tree.
    ///
    /// # Returns
    /// `true` when the point referenced a leaf within bounds and the
    /// selection moved.
    pub fn set_caret(&mut self, point: CaretPoint) -> bool {
        match self.tree.leaf_len_chars(point.leaf) {
            Some(len) if point.offset <= len => {
                self.selection = Some(point);
                true
            }
            _ => false,
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Measures the selection's plain-text offset against the live tree.
    ///
    /// # Returns
    /// The caret offset, or `None` when there is no usable selection.
    pub fn caret_offset(&self) -> Option<usize> {
        self.selection
            .and_then(|point| measure_offset(&self.tree, point))
    }

    /// Inserts text into the leaf under the caret and advances the caret,
    /// emulating a host applying a keystroke to the live tree in place.
    ///
    /// # Returns
    /// `true` when there was a valid caret to type at.
    pub fn type_text(&mut self, text: &str) -> bool {
        let Some(point) = self.selection else {
            return false;
        };
        let Some(len) = self.tree.leaf_len_chars(point.leaf) else {
            return false;
        };
        if point.offset > len || !self.tree.insert_in_leaf(point.leaf, point.offset, text) {
            return false;
        }
        self.selection = Some(CaretPoint {
            leaf: point.leaf,
            offset: point.offset + text.chars().count(),
        });
        true
    }

    /// Deletes a character range from the leaf under the caret, moving the
    /// caret to the start of the removed range when it sat inside or after
    /// it.
    ///
    /// # Returns
    /// `true` when there was a valid caret leaf to delete from.
    pub fn delete_range(&mut self, chars: Range<usize>) -> bool {
        let Some(point) = self.selection else {
            return false;
        };
        if !self.tree.delete_in_leaf(point.leaf, chars.clone()) {
            return false;
        }
        let removed = chars.end.saturating_sub(chars.start);
        let offset = if point.offset >= chars.end {
            point.offset - removed
        } else {
            point.offset.min(chars.start)
        };
        self.selection = Some(CaretPoint {
            leaf: point.leaf,
            offset,
        });
        true
    }

    /// Replaces the live tree wholesale, clearing the selection. Used by
    /// programmatic setters, where no user caret exists to preserve.
    pub fn reset_to_text(&mut self, text: &str) {
        self.tree = highlight(text);
        self.selection = None;
    }

    /// Places the caret at a plain-text offset in the live tree.
    ///
    /// # Returns
    /// `true` when the offset was within range.
    pub fn set_caret_offset(&mut self, offset: usize) -> bool {
        match place_caret(&self.tree, offset) {
            Some(point) => {
                self.selection = Some(point);
                true
            }
            None => false,
        }
    }

    fn first_leaf(&self) -> Option<NodeId> {
        self.tree.leaves().next().map(|(id, _)| id)
    }

    /// Places the caret at the very start of the document.
    ///
    /// # Returns
    /// `true` when the tree has at least one leaf.
    pub fn set_caret_to_start(&mut self) -> bool {
        match self.first_leaf() {
            Some(leaf) => {
                self.selection = Some(CaretPoint { leaf, offset: 0 });
                true
            }
            None => false,
        }
    }
}

/// Runs one caret-stable render cycle.
///
/// Extracts plain text from the (possibly host-edited) live tree, measures
/// the caret's plain-text offset, recomputes the markup, and writes it back
/// only when the serialized form actually changed. The comparison is a
/// correctness requirement, not an optimization: writing an identical tree
/// still resets a live caret, so the idempotence check is what prevents
/// caret drift on benign re-renders.
///
/// # Returns
/// Whether the live tree was replaced.
pub fn rerender(surface: &mut Surface) -> RenderOutcome {
    let text = surface.tree.plain_text();
    let caret = surface.caret_offset();

    let next = highlight(&text);
    if next.serialize() == surface.tree.serialize() {
        trace!("markup unchanged; skipping write");
        return RenderOutcome::Unchanged;
    }

    surface.tree = next;
    surface.selection = caret.and_then(|offset| place_caret(&surface.tree, offset));
    RenderOutcome::Updated
}
