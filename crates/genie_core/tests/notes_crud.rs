use genie_core::repo::kv_repo::NOTES_KEY;
use genie_core::service::note_service::default_seed_notes;
use genie_core::{
    KeyValueStore, KvRepository, MemoryKvStore, Note, NoteDraft, NoteRepository, NoteService,
    RepoError, SqliteKvStore, ValidationError,
};
use std::thread;
use std::time::Duration;

fn sqlite_repo() -> KvRepository<SqliteKvStore> {
    KvRepository::new(SqliteKvStore::open_in_memory().unwrap())
}

#[test]
fn first_list_seeds_example_note() {
    let repo = sqlite_repo();
    let service = NoteService::new(&repo);

    let notes = service.list_notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, "1");
    assert_eq!(notes[0].title, "Project Ideas");
    assert!(notes[0].date > 0);

    let stored: Vec<Note> = repo.storage().get(NOTES_KEY).unwrap();
    assert_eq!(stored, notes);
}

#[test]
fn create_edit_delete_roundtrip() {
    let repo = sqlite_repo();
    let service = NoteService::new(&repo);
    service.list_notes();

    let created = service
        .save_note(&NoteDraft::new("Groceries", "eggs"), false)
        .unwrap();
    assert!(!created.id.is_empty());
    assert_ne!(created.id, "1");

    thread::sleep(Duration::from_millis(2));
    let mut draft = NoteDraft::from_note(&created);
    draft.content = "eggs, milk".to_string();
    let edited = service.save_note(&draft, true).unwrap();
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.content, "eggs, milk");
    assert!(edited.date > created.date);

    let notes = service.list_notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[1], edited);

    assert!(service.delete_note(created.id.as_str()));
    assert!(!service.delete_note(created.id.as_str()));
    assert_eq!(service.list_notes().len(), 1);
}

#[test]
fn note_validation_and_unknown_edit_target() {
    let repo = sqlite_repo();

    assert_eq!(
        repo.upsert_note(&NoteDraft::new(" ", "body"), false)
            .unwrap_err(),
        RepoError::Validation(ValidationError::EmptyTitle)
    );

    let mut draft = NoteDraft::new("Ghost", "");
    draft.id = Some("404".to_string());
    assert_eq!(
        repo.upsert_note(&draft, true).unwrap_err(),
        RepoError::NotFound("404".to_string())
    );
}

#[test]
fn deleting_the_last_note_reseeds_on_next_list() {
    let repo = sqlite_repo();
    repo.list_notes(&default_seed_notes());
    assert!(repo.delete_note("1"));

    let notes = repo.list_notes(&default_seed_notes());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Project Ideas");
}

#[test]
fn notes_saved_with_iso_dates_still_load() {
    let store = MemoryKvStore::new();
    store
        .set_item(
            NOTES_KEY,
            r#"[{"id":"1709288130000","title":"Groceries","content":"eggs","date":"2024-03-01T10:15:30.000Z"}]"#,
        )
        .unwrap();
    let repo = KvRepository::new(store);

    let notes = repo.list_notes(&default_seed_notes());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].date, 1_709_288_130_000);
}
