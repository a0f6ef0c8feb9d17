use super::*;
use crate::keymap::KeyChord;
use crate::storage::MemoryStore;
use crate::test_support::memory_store;
use std::sync::Arc;

const PERIOD: Duration = Duration::from_secs(5);

fn session_with(content: &str) -> (EditorSession, crate::storage::SharedStore, Instant) {
    let kv = memory_store();
    let docs = DocumentStore::new(kv.clone());
    let start = Instant::now();
    let session = EditorSession::new(docs, "notes.md", content, PERIOD, start);
    (session, kv, start)
}

#[test]
fn save_then_reload_round_trips_buffer() {
    let (mut session, kv, start) = session_with("");
    session.edit("# Title\n\nbody");
    assert!(session.is_dirty());
    session.save(start).expect("save");
    assert!(!session.is_dirty());
    assert!(session.last_saved().is_some());
    assert_eq!(
        kv.get("doc:notes.md").expect("get").as_deref(),
        Some("# Title\n\nbody")
    );
}

#[test]
fn insert_syntax_appends_at_end() {
    let (mut session, _kv, _start) = session_with("Hello ");
    session.insert_syntax("**", "**", "bold text");
    assert_eq!(session.text(), "Hello **bold text**");
    session.insert_snippet(SnippetKind::Link);
    assert_eq!(session.text(), "Hello **bold text**[link text](url)");
}

#[test]
fn save_ack_expires_after_two_seconds() {
    let (mut session, _kv, start) = session_with("x");
    assert!(!session.show_save_ack(start));
    session.save(start).expect("save");
    assert!(session.show_save_ack(start + Duration::from_millis(1999)));
    assert!(!session.show_save_ack(start + SAVE_ACK_TTL));
}

#[test]
fn autosave_writes_each_period_without_ack() {
    let (mut session, kv, start) = session_with("draft");
    assert!(!session.tick(start + Duration::from_secs(4)).expect("early tick"));
    assert_eq!(kv.get("doc:notes.md").expect("get"), None);

    assert!(session.tick(start + PERIOD).expect("tick"));
    assert_eq!(kv.get("doc:notes.md").expect("get").as_deref(), Some("draft"));
    assert!(!session.show_save_ack(start + PERIOD));

    // Unchanged buffer still writes; the stored value stays identical.
    assert!(session.tick(start + PERIOD * 2).expect("second tick"));
    assert_eq!(kv.get("doc:notes.md").expect("get").as_deref(), Some("draft"));
}

#[test]
fn ended_session_stops_writing() {
    let (mut session, kv, start) = session_with("draft");
    session.end();
    assert!(!session.autosave_running());
    assert!(!session.tick(start + PERIOD * 3).expect("tick"));
    assert_eq!(kv.get("doc:notes.md").expect("get"), None);
    assert_eq!(session.next_deadline(start), None);
}

#[test]
fn load_switches_file_and_restarts_timer() {
    let (mut session, kv, start) = session_with("first");
    session.set_view_mode(ViewMode::Preview);
    let later = start + Duration::from_secs(3);
    session.load("other.md", "second", later);
    assert_eq!(session.name(), "other.md");
    assert_eq!(session.text(), "second");
    assert_eq!(session.view_mode(), ViewMode::Preview);
    assert!(!session.tick(start + PERIOD).expect("not yet due"));
    assert!(session.tick(later + PERIOD).expect("due"));
    assert_eq!(kv.get("doc:other.md").expect("get").as_deref(), Some("second"));
    assert_eq!(kv.get("doc:notes.md").expect("get"), None);
}

#[test]
fn key_chords_dispatch_commands() {
    let (mut session, kv, start) = session_with("");
    let effect = session
        .handle_key(KeyChord::ctrl('b'), start)
        .expect("ok");
    assert_eq!(effect, KeyOutcome::Handled(CommandEffect::Edited));
    assert_eq!(session.text(), "**bold text**");

    let effect = session
        .handle_key(KeyChord::ctrl('1'), start)
        .expect("ok");
    assert_eq!(
        effect,
        KeyOutcome::Handled(CommandEffect::ViewChanged(ViewMode::Edit))
    );
    assert_eq!(session.view_mode(), ViewMode::Edit);

    let effect = session
        .handle_key(KeyChord::ctrl('S'), start)
        .expect("ok");
    assert_eq!(effect, KeyOutcome::Handled(CommandEffect::Saved));
    assert_eq!(
        kv.get("doc:notes.md").expect("get").as_deref(),
        Some("**bold text**")
    );
    assert!(session.show_save_ack(start));

    assert_eq!(
        session.handle_key(KeyChord::plain('s'), start).expect("plain"),
        KeyOutcome::Ignored
    );
    assert_eq!(
        session.handle_key(KeyChord::ctrl('q'), start).expect("unbound"),
        KeyOutcome::Ignored
    );
}

#[test]
fn export_names_download_after_file() {
    let (session, _kv, _start) = session_with("# Notes");
    let download = session.export();
    assert_eq!(download.file_name, "notes.md");
    assert_eq!(download.mime, "text/markdown");
    assert_eq!(download.content, "# Notes");
}

#[test]
fn failed_save_keeps_buffer_and_reports_error() {
    let kv: crate::storage::SharedStore = Arc::new(MemoryStore::with_quota(16));
    let docs = DocumentStore::new(kv.clone());
    let start = Instant::now();
    let mut session = EditorSession::new(docs, "notes.md", "", PERIOD, start);
    session.edit("this buffer is far larger than the quota allows");

    let err = session.save(start).expect_err("quota");
    assert!(matches!(err, AppError::QuotaExceeded { .. }));
    assert_eq!(session.text(), "this buffer is far larger than the quota allows");
    assert!(session.is_dirty());
    assert!(session.last_saved().is_none());
    assert!(!session.show_save_ack(start));

    assert!(session.tick(start + PERIOD).is_err());
    assert!(session.autosave_running());
}

#[test]
fn next_deadline_prefers_earliest_event() {
    let (mut session, _kv, start) = session_with("x");
    assert_eq!(session.next_deadline(start), Some(start + PERIOD));
    session.save(start).expect("save");
    assert_eq!(session.next_deadline(start), Some(start + SAVE_ACK_TTL));
    assert_eq!(
        session.next_deadline(start + SAVE_ACK_TTL),
        Some(start + PERIOD)
    );
}

#[test]
fn view_modes_select_panes() {
    assert_eq!(ViewMode::default(), ViewMode::Split);
    assert!(ViewMode::Edit.shows_editor() && !ViewMode::Edit.shows_preview());
    assert!(!ViewMode::Preview.shows_editor() && ViewMode::Preview.shows_preview());
    assert!(ViewMode::Split.shows_editor() && ViewMode::Split.shows_preview());
}
