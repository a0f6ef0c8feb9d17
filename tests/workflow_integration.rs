use mdvie::loader::{load_document, ContentOrigin};
use mdvie::storage::open_store;
use mdvie::templates::BundledTemplate;
use mdvie::{Config, DocumentStore, EditorSession, FileRegistry, Settings};
use std::time::Instant;
use tempfile::TempDir;

fn redb_config(dir: &TempDir) -> Config {
    Config {
        db_path: dir.path().join("db").to_string_lossy().to_string(),
        ephemeral: false,
        ..Config::default()
    }
}

#[test]
fn edits_survive_reopening_the_database() {
    let dir = TempDir::new().expect("tempdir");
    let config = redb_config(&dir);
    let start = Instant::now();

    {
        let store = open_store(&config).expect("open");
        let mut registry = FileRegistry::load(DocumentStore::new(store.clone())).expect("registry");
        let name = registry.create().expect("create");
        let loaded =
            load_document(registry.documents(), &BundledTemplate, &name).expect("load new");
        assert_eq!(loaded.origin, ContentOrigin::Synthesized);

        let mut session = EditorSession::new(
            registry.documents().clone(),
            loaded.name,
            loaded.content,
            config.auto_save_period(),
            start,
        );
        session.edit("# Journal\n\nfirst entry");
        assert!(session.tick(start + config.auto_save_period()).expect("tick"));
        session.end();

        registry.rename(&name, "journal").expect("rename");
        let mut settings = Settings::load(&store).expect("settings");
        settings.set_font_size(&store, 20).expect("font size");
    }

    let store = open_store(&config).expect("reopen");
    let registry = FileRegistry::load(DocumentStore::new(store.clone())).expect("registry");
    assert_eq!(
        registry.files(),
        ["template.md".to_string(), "journal.md".to_string()]
    );
    let loaded =
        load_document(registry.documents(), &BundledTemplate, "journal.md").expect("load");
    assert_eq!(loaded.origin, ContentOrigin::Stored);
    assert_eq!(loaded.content, "# Journal\n\nfirst entry");
    assert_eq!(Settings::load(&store).expect("settings").font_size, 20);
}

#[test]
fn ephemeral_config_leaves_no_database_behind() {
    let dir = TempDir::new().expect("tempdir");
    let config = Config {
        ephemeral: true,
        ..redb_config(&dir)
    };
    let store = open_store(&config).expect("open");
    DocumentStore::new(store)
        .set("notes.md", "scratch")
        .expect("set");
    assert!(!dir.path().join("db").exists());
}
