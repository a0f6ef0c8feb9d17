//! Headless app tests: routing, sidebar actions, saves and rendering.

use super::shortcuts::key_event;
use super::*;
use eframe::egui::{Key, Modifiers};
use mdvie_core::keymap::{EditorCommand, KeyChord};
use mdvie_core::registry::RenameKey;
use mdvie_core::templates::BundledTemplate;
use mdvie_core::{MemoryStore, ViewMode};
use std::sync::Arc;

const PERIOD: Duration = Duration::from_secs(5);

struct TestHarness {
    app: MdvieApp,
    store: SharedStore,
    start: Instant,
}

fn harness_at(store: SharedStore, route: Route) -> TestHarness {
    let start = Instant::now();
    let app = MdvieApp::with_store(
        store.clone(),
        Config::default(),
        Box::new(BundledTemplate),
        route,
        start,
    )
    .expect("app");
    TestHarness { app, store, start }
}

fn harness_with_store(store: SharedStore) -> TestHarness {
    harness_at(store, Route::Editor(BOOTSTRAP_FILE_NAME.to_string()))
}

fn make_app() -> TestHarness {
    harness_with_store(Arc::new(MemoryStore::new()))
}

fn stored(store: &SharedStore, name: &str) -> Option<String> {
    store.get(&format!("doc:{}", name)).expect("get")
}

fn run_frame(app: &mut MdvieApp, ctx: &egui::Context, input: egui::RawInput) {
    let _ = ctx.run(input, |ctx| {
        app.render_sidebar(ctx);
        app.render_status_bar(ctx);
        match app.route {
            Route::Editor(_) => app.render_editor_panel(ctx),
            Route::Settings => app.render_settings_panel(ctx),
        }
        app.render_toasts(ctx);
    });
}

#[test]
fn startup_opens_bootstrap_template() {
    let TestHarness { app, store, .. } = make_app();
    assert_eq!(app.route, Route::Editor(BOOTSTRAP_FILE_NAME.to_string()));
    let session = app.session.as_ref().expect("session");
    assert!(session.text().starts_with("# Welcome to MDVie"));
    assert_eq!(stored(&store, BOOTSTRAP_FILE_NAME).as_deref(), Some(session.text()));
    assert_eq!(app.registry.files(), [BOOTSTRAP_FILE_NAME.to_string()]);
}

#[test]
fn startup_honors_requested_route() {
    let TestHarness { app, .. } = harness_at(Arc::new(MemoryStore::new()), Route::Settings);
    assert_eq!(app.route, Route::Settings);
    assert!(app.session.is_none());

    let TestHarness { app, store, .. } = harness_at(
        Arc::new(MemoryStore::new()),
        Route::parse("/edit/road%20map.md").expect("route"),
    );
    assert_eq!(app.route, Route::Editor("road map.md".to_string()));
    assert!(stored(&store, "road map.md").is_some_and(|text| text.starts_with("# road map\n")));
}

#[test]
fn create_navigates_to_new_file_with_default_content() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.create_file(start);
    assert_eq!(app.route, Route::Editor("Untitled-2.md".to_string()));
    let session = app.session.as_ref().expect("session");
    assert!(session.text().starts_with("# Untitled-2\n"));
    assert!(stored(&store, "Untitled-2.md").is_some());
}

#[test]
fn navigation_flushes_unsaved_edits() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.session.as_mut().expect("session").edit("changed");
    app.navigate(Route::Settings, start);
    assert!(app.session.is_none());
    assert_eq!(stored(&store, BOOTSTRAP_FILE_NAME).as_deref(), Some("changed"));
}

#[test]
fn autosave_runs_from_update_polling() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.session.as_mut().expect("session").edit("draft body");
    app.maybe_autosave(start + Duration::from_secs(1));
    assert_ne!(stored(&store, BOOTSTRAP_FILE_NAME).as_deref(), Some("draft body"));
    app.maybe_autosave(start + PERIOD);
    assert_eq!(stored(&store, BOOTSTRAP_FILE_NAME).as_deref(), Some("draft body"));
}

#[test]
fn renaming_open_file_follows_it() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.create_file(start);
    app.session.as_mut().expect("session").edit("keep me");

    app.registry.start_rename("Untitled-2.md");
    *app.registry.rename_text_mut().expect("editing") = "notes".to_string();
    app.handle_rename_key(RenameKey::Enter, start);

    assert_eq!(app.route, Route::Editor("notes.md".to_string()));
    assert_eq!(app.session.as_ref().expect("session").text(), "keep me");
    assert_eq!(stored(&store, "notes.md").as_deref(), Some("keep me"));
    assert_eq!(stored(&store, "Untitled-2.md"), None);
    assert_eq!(
        app.registry.files(),
        [BOOTSTRAP_FILE_NAME.to_string(), "notes.md".to_string()]
    );
}

#[test]
fn renaming_onto_open_file_reloads_moved_content() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    let template = stored(&store, BOOTSTRAP_FILE_NAME).expect("template stored");
    app.create_file(start);
    assert_eq!(app.route, Route::Editor("Untitled-2.md".to_string()));

    app.registry.start_rename(BOOTSTRAP_FILE_NAME);
    *app.registry.rename_text_mut().expect("editing") = "Untitled-2".to_string();
    app.handle_rename_key(RenameKey::Enter, start);

    assert_eq!(app.route, Route::Editor("Untitled-2.md".to_string()));
    assert_eq!(app.session.as_ref().expect("session").text(), template);
    assert_eq!(app.registry.files(), ["Untitled-2.md".to_string()]);

    app.maybe_autosave(start + PERIOD);
    assert_eq!(stored(&store, "Untitled-2.md"), Some(template));
    assert_eq!(stored(&store, BOOTSTRAP_FILE_NAME), None);
}

#[test]
fn failed_rename_reports_and_keeps_field_open() {
    let TestHarness {
        mut app, start, ..
    } = make_app();
    app.registry.start_rename(BOOTSTRAP_FILE_NAME);
    *app.registry.rename_text_mut().expect("editing") = "  ".to_string();
    app.handle_rename_key(RenameKey::Enter, start);
    assert!(app.status_text().is_some_and(|text| text.starts_with("Rename failed")));
    assert!(app.registry.rename_draft().is_some());
    assert_eq!(app.route, Route::Editor(BOOTSTRAP_FILE_NAME.to_string()));
}

#[test]
fn deleting_open_file_moves_to_first_remaining() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.create_file(start);
    app.delete_file("Untitled-2.md", start);
    assert_eq!(stored(&store, "Untitled-2.md"), None);
    assert_eq!(app.route, Route::Editor(BOOTSTRAP_FILE_NAME.to_string()));

    app.delete_file(BOOTSTRAP_FILE_NAME, start);
    assert!(app.registry.files().is_empty());
    assert_eq!(app.route, Route::Settings);
    assert_eq!(stored(&store, BOOTSTRAP_FILE_NAME), None);
}

#[test]
fn downloads_and_exports_are_queued_for_the_dialog() {
    let TestHarness {
        mut app, start, ..
    } = make_app();
    app.session.as_mut().expect("session").edit("# Exported");
    app.run_editor_command(EditorCommand::Export, start);
    app.download_file(BOOTSTRAP_FILE_NAME);

    let queued: Vec<_> = app.pending_downloads.iter().cloned().collect();
    assert_eq!(queued.len(), 2);
    assert_eq!(queued[0].file_name, BOOTSTRAP_FILE_NAME);
    assert_eq!(queued[0].content, "# Exported");
    assert_eq!(queued[1].content, "# Exported", "download flushes edits first");
}

#[test]
fn chords_drive_session_commands() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.session.as_mut().expect("session").edit("");
    app.handle_chord(KeyChord::ctrl('k'), start);
    app.handle_chord(KeyChord::ctrl('1'), start);
    app.handle_chord(KeyChord::ctrl('s'), start);
    let session = app.session.as_ref().expect("session");
    assert_eq!(session.text(), "[link text](url)");
    assert_eq!(session.view_mode(), ViewMode::Edit);
    assert!(session.show_save_ack(start));
    assert_eq!(
        stored(&store, BOOTSTRAP_FILE_NAME).as_deref(),
        Some("[link text](url)")
    );
}

#[test]
fn storage_failure_surfaces_as_status_and_keeps_buffer() {
    let TestHarness {
        mut app, start, ..
    } = harness_with_store(Arc::new(MemoryStore::with_quota(8 * 1024)));
    let big = "x".repeat(16 * 1024);
    app.session.as_mut().expect("session").edit(big.clone());
    app.handle_chord(KeyChord::ctrl('s'), start);
    assert!(app.status_text().is_some_and(|text| text.starts_with("Save failed")));
    let session = app.session.as_ref().expect("session");
    assert_eq!(session.text(), big);
    assert!(session.is_dirty());
    assert_eq!(app.toasts.len(), 1);
}

#[test]
fn settings_persist_font_size_and_validate_git_identity() {
    let TestHarness {
        mut app,
        store,
        start,
    } = make_app();
    app.set_font_size(30);
    assert_eq!(app.settings.font_size, 24);
    assert_eq!(app.session.as_ref().expect("session").font_size(), 24);
    assert_eq!(Settings::load(&store).expect("load").font_size, 24);

    app.git_username_draft = "dev".to_string();
    app.git_email_draft = "   ".to_string();
    app.submit_git_identity(start);
    assert!(app.git_saved_until.is_none());
    assert!(app.status_text().is_some());

    app.git_email_draft = "dev@example.com".to_string();
    app.submit_git_identity(start);
    assert_eq!(app.git_saved_until, Some(start + GIT_SAVED_TTL));
    assert_eq!(
        Settings::load(&store).expect("load").git_email,
        "dev@example.com"
    );
    app.expire_feedback(start + GIT_SAVED_TTL);
    assert!(app.git_saved_until.is_none());
}

#[test]
fn frames_render_every_page_without_panicking() {
    let TestHarness {
        mut app, start, ..
    } = make_app();
    let ctx = egui::Context::default();
    app.ensure_style(&ctx);
    run_frame(&mut app, &ctx, egui::RawInput::default());

    app.registry.toggle_menu(BOOTSTRAP_FILE_NAME);
    app.session.as_mut().expect("session").set_view_mode(ViewMode::Preview);
    run_frame(&mut app, &ctx, egui::RawInput::default());

    app.navigate(Route::Settings, start);
    run_frame(&mut app, &ctx, egui::RawInput::default());
}

#[test]
fn shortcut_events_are_consumed_before_widgets() {
    let mut events = vec![
        key_event(Key::S, Modifiers::COMMAND),
        egui::Event::Text("a".to_string()),
    ];
    let chords = shortcuts::take_bound_chords(&mut events);
    assert_eq!(chords, vec![KeyChord::ctrl('s')]);
    assert_eq!(events, vec![egui::Event::Text("a".to_string())]);
}

#[test]
fn next_wakeup_tracks_autosave_deadline() {
    let TestHarness { app, start, .. } = make_app();
    assert_eq!(app.next_wakeup(start), Some(start + PERIOD));
}
