//! Note use-case service.
//!
//! # Responsibility
//! - Provide note list/save/delete APIs with first-run seed data.
//!
//! # Invariants
//! - Saving always refreshes the note `date`.

use crate::model::note::{Note, NoteDraft};
use crate::model::now_epoch_ms;
use crate::repo::kv_repo::RepoResult;
use crate::repo::note_repo::NoteRepository;

/// First-run note collection: one example note dated now.
pub fn default_seed_notes() -> Vec<Note> {
    vec![Note {
        id: "1".to_string(),
        title: "Project Ideas".to_string(),
        content: "Brainstorm ideas for the new mobile app project".to_string(),
        date: now_epoch_ms(),
    }]
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists notes in collection order, seeding on first run.
    pub fn list_notes(&self) -> Vec<Note> {
        self.repo.list_notes(&default_seed_notes())
    }

    pub fn save_note(&self, draft: &NoteDraft, is_edit: bool) -> RepoResult<Note> {
        self.repo.upsert_note(draft, is_edit)
    }

    pub fn delete_note(&self, id: &str) -> bool {
        self.repo.delete_note(id)
    }
}
