//! Regex-driven token highlighting for tag-annotated scripts.
//!
//! Ordered, non-overlapping passes over the whole text. Earlier, more
//! specific passes claim spans first; later, more generic passes only match
//! inside unclaimed text. A comma inside a bracketed tag therefore renders
//! with tag styling, never comma styling.

use crate::markup::{MarkupTree, SpanCategory};
use regex::Regex;
use std::sync::LazyLock;

const TIME_RANGE_PATTERN: &str = r"\d{2}:\d{2}:\d{2},\d{3}\s+-->\s+\d{2}:\d{2}:\d{2},\d{3}";

static CUE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^(\d+)\s*\n({TIME_RANGE_PATTERN})")).expect("cue header pattern")
});
static TIME_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_RANGE_PATTERN).expect("time range pattern"));
static BRACKET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]").expect("bracket tag pattern"));
static COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(",").expect("comma pattern"));
static PERIOD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.").expect("period pattern"));
static TERMINAL_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[?!;]").expect("terminal punctuation pattern"));
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("  +").expect("space run pattern"));

/// One claimed byte span and its category.
#[derive(Clone, Copy, Debug)]
struct Claim {
    start: usize,
    end: usize,
    category: SpanCategory,
}

/// Tokenizes plain text into a decorated markup tree.
///
/// Pure and total: any input (including the empty string and text containing
/// markup-escape characters) produces a valid tree whose leaves concatenate
/// back to `text`. Worst case is a single plain leaf.
///
/// # Returns
/// The decorated tree for `text`.
pub fn highlight(text: &str) -> MarkupTree {
    let mut claimed = vec![false; text.len()];
    let mut claims: Vec<Claim> = Vec::new();

    // Pass 1: sequence number + following time range, tagged jointly so the
    // digits line and the timing line pick up their own styling while any
    // whitespace between them stays plain.
    for caps in CUE_HEADER.captures_iter(text) {
        let (Some(number), Some(timing)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if !is_free(&claimed, number.start(), timing.end()) {
            continue;
        }
        push_claim(
            &mut claimed,
            &mut claims,
            number.start(),
            number.end(),
            SpanCategory::SequenceNumber,
        );
        push_claim(
            &mut claimed,
            &mut claims,
            timing.start(),
            timing.end(),
            SpanCategory::TimeRange,
        );
    }

    // Passes 2-7, in priority order.
    run_pass(text, &TIME_RANGE, SpanCategory::TimeRange, &mut claimed, &mut claims);
    run_pass(text, &BRACKET_TAG, SpanCategory::BracketTag, &mut claimed, &mut claims);
    run_pass(text, &COMMA, SpanCategory::Comma, &mut claimed, &mut claims);
    run_pass(text, &PERIOD, SpanCategory::Period, &mut claimed, &mut claims);
    run_pass(text, &TERMINAL_PUNCT, SpanCategory::TerminalPunct, &mut claimed, &mut claims);
    run_pass(text, &SPACE_RUN, SpanCategory::SpaceRun, &mut claimed, &mut claims);

    build_tree(text, claims)
}

fn run_pass(
    text: &str,
    pattern: &Regex,
    category: SpanCategory,
    claimed: &mut [bool],
    claims: &mut Vec<Claim>,
) {
    for found in pattern.find_iter(text) {
        if is_free(claimed, found.start(), found.end()) {
            push_claim(claimed, claims, found.start(), found.end(), category);
        }
    }
}

fn is_free(claimed: &[bool], start: usize, end: usize) -> bool {
    claimed[start..end].iter().all(|taken| !taken)
}

fn push_claim(
    claimed: &mut [bool],
    claims: &mut Vec<Claim>,
    start: usize,
    end: usize,
    category: SpanCategory,
) {
    claimed[start..end].iter_mut().for_each(|taken| *taken = true);
    claims.push(Claim {
        start,
        end,
        category,
    });
}

fn build_tree(text: &str, mut claims: Vec<Claim>) -> MarkupTree {
    let mut tree = MarkupTree::new();
    if text.is_empty() {
        // Keep one empty leaf so a caret can land in an empty document.
        tree.add_text("");
        return tree;
    }

    claims.sort_by_key(|claim| claim.start);

    let mut cursor = 0usize;
    for claim in claims {
        if cursor < claim.start {
            tree.add_text(&text[cursor..claim.start]);
        }
        let span = tree.add_span(claim.category);
        tree.add_text_in(span, &text[claim.start..claim.end]);
        cursor = claim.end;
    }
    if cursor < text.len() {
        tree.add_text(&text[cursor..]);
    }
    tree
}
