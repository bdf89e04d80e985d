//! Caret mapping between a decorated tree and plain-text offsets.
//!
//! A selection point is `(leaf, intra-leaf offset)`, the headless
//! generalization of a selection anchor in a live rendering surface. Both
//! directions treat wrapper nodes as transparent: only leaf characters count,
//! at any nesting depth, in strict document order.

use crate::markup::{MarkupTree, NodeId};

/// Zero-width selection position inside a [`MarkupTree`] leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretPoint {
    /// Leaf node holding the caret.
    pub leaf: NodeId,
    /// Character offset within the leaf, in `[0, leaf_len]`.
    pub offset: usize,
}

/// Counts plain-text characters from the start of the tree up to `point`.
///
/// # Returns
/// The caret's plain-text offset, or `None` for a stale point: a node id that
/// is not a leaf of `tree`, or an intra-leaf offset past the leaf's length.
pub fn measure_offset(tree: &MarkupTree, point: CaretPoint) -> Option<usize> {
    let mut preceding = 0usize;
    for (leaf, text) in tree.leaves() {
        let len = text.chars().count();
        if leaf == point.leaf {
            if point.offset > len {
                return None;
            }
            return Some(preceding + point.offset);
        }
        preceding += len;
    }
    None
}

/// Locates the leaf and in-leaf position whose cumulative preceding
/// leaf-character count equals `offset`.
///
/// Offset `0` resolves to the very first leaf's start; an offset equal to the
/// total leaf length resolves to the end of the last leaf. A boundary offset
/// between two leaves resolves into the earlier leaf's end, matching where a
/// caret lands after typing at the end of a run.
///
/// # Returns
/// The selection point, or `None` when `offset` exceeds the total leaf
/// character count (callers leave their prior selection state untouched).
pub fn place_caret(tree: &MarkupTree, offset: usize) -> Option<CaretPoint> {
    let mut preceding = 0usize;
    for (leaf, text) in tree.leaves() {
        let len = text.chars().count();
        if offset <= preceding + len {
            return Some(CaretPoint {
                leaf,
                offset: offset - preceding,
            });
        }
        preceding += len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::highlight;
    use crate::markup::SpanCategory;

    #[test]
    fn zero_offset_resolves_to_first_leaf_start() {
        let tree = highlight("[tag] text");
        let point = place_caret(&tree, 0).expect("place");
        assert_eq!(point.offset, 0);
        let first_leaf = tree.leaves().next().expect("leaf").0;
        assert_eq!(point.leaf, first_leaf);
    }

    #[test]
    fn full_length_offset_resolves_to_last_leaf_end() {
        let text = "Hello, world.";
        let tree = highlight(text);
        let total = tree.len_chars();
        let point = place_caret(&tree, total).expect("place");
        let (last_leaf, last_text) = tree.leaves().last().expect("leaf");
        assert_eq!(point.leaf, last_leaf);
        assert_eq!(point.offset, last_text.chars().count());
    }

    #[test]
    fn out_of_range_offset_places_nothing() {
        let tree = highlight("abc");
        assert_eq!(place_caret(&tree, 4), None);
    }

    #[test]
    fn round_trip_holds_for_every_offset() {
        let text = "1\n00:00:01,000 --> 00:00:02,000\n[Bob] Hi, there!";
        let tree = highlight(text);
        for offset in 0..=tree.len_chars() {
            let point = place_caret(&tree, offset).expect("place");
            assert_eq!(measure_offset(&tree, point), Some(offset));
        }
    }

    #[test]
    fn measurement_ignores_wrapper_nesting_shape() {
        // Hand-built tree with nested wrappers; the highlighter never emits
        // this shape, but the mapper must not care.
        let mut tree = MarkupTree::new();
        tree.add_text("ab");
        let outer = tree.add_span(SpanCategory::BracketTag);
        tree.add_text_in(outer, "cd").expect("span parent");
        let inner = tree
            .add_span_in(outer, SpanCategory::Comma)
            .expect("span parent");
        let deep = tree.add_text_in(inner, "ef").expect("span parent");
        tree.add_text("gh");

        assert_eq!(
            measure_offset(&tree, CaretPoint { leaf: deep, offset: 1 }),
            Some(5)
        );
        let point = place_caret(&tree, 5).expect("place");
        assert_eq!(point, CaretPoint { leaf: deep, offset: 1 });
    }

    #[test]
    fn stale_points_measure_as_none() {
        let tree = highlight("short");
        let leaf = tree.leaves().next().expect("leaf").0;
        assert_eq!(
            measure_offset(&tree, CaretPoint { leaf, offset: 99 }),
            None
        );

        // A wrapper id is never a valid selection anchor.
        let mut with_span = MarkupTree::new();
        let span = with_span.add_span(SpanCategory::Comma);
        with_span.add_text_in(span, ",").expect("span parent");
        assert_eq!(
            measure_offset(&with_span, CaretPoint { leaf: span, offset: 0 }),
            None
        );
    }

    #[test]
    fn empty_document_still_carries_a_caret() {
        let tree = highlight("");
        let point = place_caret(&tree, 0).expect("place");
        assert_eq!(point.offset, 0);
        assert_eq!(measure_offset(&tree, point), Some(0));
    }
}
