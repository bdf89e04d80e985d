//! Property tests for the lossless-decoration and caret-stability invariants.

use cuepad_editor::{highlight, measure_offset, place_caret};
use proptest::prelude::*;

/// Fragments that exercise every token category plus arbitrary filler.
fn script_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("[Alice] ".to_string()),
        Just("[pause:0.5]".to_string()),
        Just("Hello, world. ".to_string()),
        Just("1\n00:00:01,000 --> 00:00:02,000\n".to_string()),
        Just("00:01:02,003 --> 00:01:04,000".to_string()),
        Just("wait!  ok; fine? ".to_string()),
        Just("& < > ".to_string()),
        "[a-zéü \\n.,?!;\\[\\]]{0,16}",
    ];
    proptest::collection::vec(fragment, 0..8).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn decoration_is_lossless_for_arbitrary_text(text in ".*") {
        let tree = highlight(&text);
        prop_assert_eq!(tree.plain_text(), text);
    }

    #[test]
    fn decoration_is_lossless_for_script_shaped_text(text in script_strategy()) {
        let tree = highlight(&text);
        prop_assert_eq!(tree.plain_text(), text);
    }

    #[test]
    fn highlighting_is_deterministic(text in script_strategy()) {
        prop_assert_eq!(highlight(&text), highlight(&text));
        prop_assert_eq!(highlight(&text).serialize(), highlight(&text).serialize());
    }

    #[test]
    fn caret_round_trips_at_every_offset(text in script_strategy()) {
        let tree = highlight(&text);
        for offset in 0..=tree.len_chars() {
            let point = place_caret(&tree, offset);
            prop_assert!(point.is_some(), "offset {} must resolve", offset);
            if let Some(point) = point {
                prop_assert_eq!(measure_offset(&tree, point), Some(offset));
            }
        }
    }

    #[test]
    fn offsets_past_the_end_never_resolve(text in script_strategy()) {
        let tree = highlight(&text);
        prop_assert_eq!(place_caret(&tree, tree.len_chars() + 1), None);
    }

    #[test]
    fn serialization_never_leaks_raw_markup_characters(text in ".*") {
        let markup = highlight(&text).serialize();
        // Every '<' in the output belongs to a span wrapper.
        let stripped = markup
            .replace("<span class=\"", "")
            .replace("\">", "")
            .replace("</span>", "");
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
    }
}
