//! Note collection repository.
//!
//! # Responsibility
//! - Provide note CRUD over the `@notes` collection.
//!
//! # Invariants
//! - `date` is refreshed to the current time on every save.
//! - Same load/mutate/write-back discipline as the task collection.

use super::kv_repo::{KvRepository, RepoError, RepoResult, NOTES_KEY};
use crate::model::note::{Note, NoteDraft};
use crate::model::{generate_record_id, now_epoch_ms, ValidationError};
use crate::storage::KeyValueStore;
use log::{debug, info};

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Returns stored notes, or writes and returns `seed` when the collection
    /// record is absent or empty.
    fn list_notes(&self, seed: &[Note]) -> Vec<Note>;
    /// Creates (`is_edit = false`) or replaces (`is_edit = true`) one note.
    fn upsert_note(&self, draft: &NoteDraft, is_edit: bool) -> RepoResult<Note>;
    /// Removes the note by id. Returns whether a note was removed.
    fn delete_note(&self, id: &str) -> bool;
}

impl<S: KeyValueStore> NoteRepository for KvRepository<S> {
    fn list_notes(&self, seed: &[Note]) -> Vec<Note> {
        let _notes = self.lock_notes();
        if let Some(notes) = self
            .storage
            .get::<Vec<Note>>(NOTES_KEY)
            .filter(|notes| !notes.is_empty())
        {
            return notes;
        }

        self.storage.put(NOTES_KEY, seed);
        info!(
            "event=note_seed module=repo status=ok note_count={}",
            seed.len()
        );
        seed.to_vec()
    }

    fn upsert_note(&self, draft: &NoteDraft, is_edit: bool) -> RepoResult<Note> {
        draft.validate()?;

        let _notes = self.lock_notes();
        let mut notes: Vec<Note> = self.storage.get(NOTES_KEY).unwrap_or_default();
        let now = now_epoch_ms();

        let saved = if is_edit {
            let id = draft.id.as_deref().ok_or(ValidationError::MissingId)?;
            let note = notes
                .iter_mut()
                .find(|note| note.id == id)
                .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
            note.title = draft.title.clone();
            note.content = draft.content.clone();
            note.date = now;
            note.clone()
        } else {
            let note = Note {
                id: generate_record_id(now, notes.iter().map(|note| note.id.as_str())),
                title: draft.title.clone(),
                content: draft.content.clone(),
                date: now,
            };
            notes.push(note.clone());
            note
        };

        self.storage.put(NOTES_KEY, &notes);
        info!(
            "event=note_upsert module=repo status=ok mode={} note_id={}",
            if is_edit { "edit" } else { "create" },
            saved.id
        );
        Ok(saved)
    }

    fn delete_note(&self, id: &str) -> bool {
        let _notes = self.lock_notes();
        let Some(mut notes) = self.storage.get::<Vec<Note>>(NOTES_KEY) else {
            return false;
        };
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            debug!("event=note_delete module=repo status=skipped reason=not_found note_id={id}");
            return false;
        }

        self.storage.put(NOTES_KEY, &notes);
        info!("event=note_delete module=repo status=ok note_id={id}");
        true
    }
}

impl<R: NoteRepository + ?Sized> NoteRepository for &R {
    fn list_notes(&self, seed: &[Note]) -> Vec<Note> {
        (**self).list_notes(seed)
    }

    fn upsert_note(&self, draft: &NoteDraft, is_edit: bool) -> RepoResult<Note> {
        (**self).upsert_note(draft, is_edit)
    }

    fn delete_note(&self, id: &str) -> bool {
        (**self).delete_note(id)
    }
}
