use super::*;

#[test]
fn history_entry_clamps_caret_to_char_count() {
    let entry = HistoryEntry::new("héllo".to_string(), 99);
    assert_eq!(entry.caret, 5);

    let entry = HistoryEntry::new("héllo".to_string(), 2);
    assert_eq!(entry.caret, 2);
}

#[test]
fn preferences_setters_clamp_to_supported_ranges() {
    let mut prefs = Preferences::default();

    prefs.set_font_size(1);
    assert_eq!(prefs.font_size(), 2);
    prefs.set_font_size(500);
    assert_eq!(prefs.font_size(), 120);

    prefs.set_sidebar_width(10);
    assert_eq!(prefs.sidebar_width(), 150);
    prefs.set_sidebar_width(1000);
    assert_eq!(prefs.sidebar_width(), 400);

    prefs.set_ui_scale(0.1);
    assert!((prefs.ui_scale() - 0.7).abs() < f32::EPSILON);
    prefs.set_ui_scale(9.0);
    assert!((prefs.ui_scale() - 1.5).abs() < f32::EPSILON);
}

#[test]
fn blank_font_family_falls_back_to_default() {
    let mut prefs = Preferences::default();
    prefs.set_font_family("Courier New, monospace");
    assert_eq!(prefs.font_family(), "Courier New, monospace");

    prefs.set_font_family("   ");
    assert_eq!(prefs.font_family(), "monospace");
}

#[test]
fn snapshot_has_history_requires_valid_index() {
    let mut snapshot = SessionSnapshot {
        text: "abc".to_string(),
        history: vec![HistoryEntry::new("abc".to_string(), 0)],
        history_index: 0,
        preferences: Preferences::default(),
        last_workflow_value: None,
        saved_at: Utc::now(),
    };
    assert!(snapshot.has_history());

    snapshot.history_index = 5;
    assert!(!snapshot.has_history());

    snapshot.history.clear();
    snapshot.history_index = 0;
    assert!(!snapshot.has_history());
}
