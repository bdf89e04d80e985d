//! End-to-end editing cycles: surface edits, re-render, history, undo/redo.

use cuepad_editor::{rerender, EditorSession, RenderOutcome, Surface};
use std::time::{Duration, Instant};

fn pause() -> Duration {
    Duration::from_secs(10)
}

#[test]
fn typing_a_comma_rewraps_markup_without_moving_the_caret() {
    let mut session = EditorSession::new();
    let start = Instant::now();
    session.configure("Hello world", start);

    let mut surface = Surface::from_text(session.text());
    assert!(surface.set_caret_offset(5));
    assert!(surface.type_text(","));

    assert_eq!(rerender(&mut surface), RenderOutcome::Updated);
    assert_eq!(surface.plain_text(), "Hello, world");
    let caret = surface.caret_offset().expect("caret");
    assert_eq!(caret, 6);
    assert!(surface.markup().contains("<span class=\"comma\">,</span>"));

    assert!(session.apply_edit(
        &surface.plain_text(),
        caret,
        start + Duration::from_millis(100)
    ));
    assert_eq!(session.text(), "Hello, world");
}

#[test]
fn undo_restores_both_buffer_and_caret_position() {
    let mut session = EditorSession::new();
    let start = Instant::now();
    session.configure("draft", start);

    let mut surface = Surface::from_text(session.text());
    assert!(surface.set_caret_offset(5));
    assert!(surface.type_text(" one"));
    rerender(&mut surface);
    session.apply_edit(&surface.plain_text(), 9, start + pause());

    assert!(surface.set_caret_offset(9));
    assert!(surface.type_text(" two."));
    rerender(&mut surface);
    session.apply_edit(&surface.plain_text(), 14, start + pause() * 2);
    assert_eq!(session.text(), "draft one two.");

    // Undo: the session reports where the caret was at the checkpoint; the
    // surface is re-rendered from the restored text.
    let caret = session.undo().expect("undo");
    surface.reset_to_text(session.text());
    assert!(surface.set_caret_offset(caret));
    assert_eq!(surface.plain_text(), "draft one");
    assert_eq!(surface.caret_offset(), Some(9));

    let caret = session.redo().expect("redo");
    surface.reset_to_text(session.text());
    assert!(surface.set_caret_offset(caret));
    assert_eq!(surface.plain_text(), "draft one two.");
    assert_eq!(surface.caret_offset(), Some(14));
}

#[test]
fn benign_rerenders_never_disturb_the_selection() {
    let mut surface = Surface::from_text("a [tag] b.");
    assert!(surface.set_caret_offset(3));
    let before = surface.selection();

    // Unrelated churn (preference changes, focus events) re-runs the cycle
    // without any text change; the write must be skipped every time.
    for _ in 0..3 {
        assert_eq!(rerender(&mut surface), RenderOutcome::Unchanged);
        assert_eq!(surface.selection(), before);
    }
}

#[test]
fn editing_inside_a_decorated_span_reflows_tokens() {
    let mut surface = Surface::from_text("go [fast] now");
    // Caret inside the bracket-tag leaf, just before ']'.
    assert!(surface.set_caret_offset(8));
    assert!(surface.type_text("er"));

    assert_eq!(rerender(&mut surface), RenderOutcome::Updated);
    assert_eq!(surface.plain_text(), "go [faster] now");
    assert_eq!(surface.caret_offset(), Some(10));
    assert!(surface.markup().contains("[faster]"));
}

#[test]
fn deleting_a_bracket_dissolves_the_tag_span() {
    let mut surface = Surface::from_text("go [fast] now");
    // Remove the closing bracket: the whole span must fall back to plain.
    assert!(surface.set_caret_offset(9));
    assert!(surface.delete_range(5..6));

    assert_eq!(rerender(&mut surface), RenderOutcome::Updated);
    assert_eq!(surface.plain_text(), "go [fast now");
    assert!(!surface.markup().contains("bracket-tag"));
    assert_eq!(surface.caret_offset(), Some(8));
}

#[test]
fn session_and_surface_text_never_diverge_across_cycles() {
    let mut session = EditorSession::new();
    let start = Instant::now();
    session.configure("1\n00:00:01,000 --> 00:00:02,000\nline", start);

    let mut surface = Surface::from_text(session.text());
    let edits = ["?", "!", " more,", "  done."];
    for (step, snippet) in edits.iter().enumerate() {
        let end = surface.tree().len_chars();
        assert!(surface.set_caret_offset(end));
        assert!(surface.type_text(snippet));
        rerender(&mut surface);
        let caret = surface.caret_offset().expect("caret");
        assert!(session.apply_edit(
            &surface.plain_text(),
            caret,
            start + pause() * (step as u32 + 1)
        ));
        assert_eq!(session.text(), surface.plain_text());
    }
}
