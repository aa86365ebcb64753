//! The journal state container
//!
//! `Journal` owns the three persisted values (notes, gallery, access flag)
//! together with the backend they are stored in. All changes go through its
//! methods; each mutation writes the affected key back immediately.
//!
//! Every operation except [`Journal::unlock`] and [`Journal::access_state`]
//! requires the PIN gate to be open and fails with
//! [`JournalError::Locked`] otherwise.
//!
//! ## Usage
//!
//! ```ignore
//! let mut journal = Journal::open()?;
//! journal.unlock("1309")?;
//!
//! let note = Note::new(Profile::Mj, Category::Carinitos, "Buenos días", None)?;
//! journal.add_note(note)?;
//!
//! let stats = journal.stats()?;
//! ```

use anyhow::{Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::access::{AccessGate, AccessState};
use crate::config::Config;
use crate::error::{JournalError, JournalResult};
use crate::gallery::Gallery;
use crate::models::{Note, ReactionKind};
use crate::storage::{self, FileStore, KeyValueStore, ACCESS_KEY, GALLERY_KEY, NOTES_KEY};
use crate::transfer;
use crate::view::{NoteFilter, Stats};

/// Shared journal backed by a key-value store
pub struct Journal<S: KeyValueStore = FileStore> {
    /// Notes, newest first
    notes: Vec<Note>,
    gallery: Gallery,
    gate: AccessGate,
    backend: S,
}

impl Journal<FileStore> {
    /// Open the journal in the configured data directory
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(&config))
    }

    /// Open the journal with a specific configuration
    pub fn open_with_config(config: &Config) -> Self {
        Self::with_backend(FileStore::with_config(config))
    }
}

impl<S: KeyValueStore> Journal<S> {
    /// Load all three values from `backend`
    ///
    /// Missing or unreadable values start empty (and locked).
    pub fn with_backend(backend: S) -> Self {
        let notes: Vec<Note> = storage::load(&backend, NOTES_KEY, Vec::new());
        let gallery: Gallery = storage::load(&backend, GALLERY_KEY, Gallery::new());
        let unlocked: bool = storage::load(&backend, ACCESS_KEY, false);

        debug!(
            notes = notes.len(),
            gallery = gallery.len(),
            unlocked,
            "Journal loaded"
        );

        Self {
            notes,
            gallery,
            gate: AccessGate::from_flag(unlocked),
            backend,
        }
    }

    /// Give back the storage backend
    pub fn into_backend(self) -> S {
        self.backend
    }

    // ==================== Access ====================

    pub fn access_state(&self) -> AccessState {
        self.gate.state()
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    /// Submit the PIN
    ///
    /// On the first successful attempt the unlocked flag is persisted.
    /// Wrong input returns `IncorrectPin` and leaves the journal locked.
    pub fn unlock(&mut self, pin: &str) -> JournalResult<()> {
        match self.gate.submit(pin) {
            Ok(true) => {
                storage::save(&mut self.backend, ACCESS_KEY, &true);
                info!("Journal unlocked");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => {
                debug!("Rejected PIN attempt");
                Err(e)
            }
        }
    }

    // ==================== Notes ====================

    /// All notes, newest first
    pub fn notes(&self) -> JournalResult<&[Note]> {
        self.gate.ensure_unlocked()?;
        Ok(&self.notes)
    }

    /// Look up a note by ID
    pub fn get_note(&self, id: Uuid) -> JournalResult<Option<&Note>> {
        self.gate.ensure_unlocked()?;
        Ok(self.notes.iter().find(|n| n.id() == id))
    }

    /// Add a note at the front of the collection
    ///
    /// Fails with `DuplicateNote` if a note with the same ID is already
    /// stored, and with `EmptyNote` if it has neither text nor a photo.
    pub fn add_note(&mut self, note: Note) -> JournalResult<()> {
        self.gate.ensure_unlocked()?;
        if self.notes.iter().any(|n| n.id() == note.id()) {
            return Err(JournalError::DuplicateNote(note.id()));
        }
        if !note.has_content() {
            return Err(JournalError::EmptyNote);
        }

        debug!(
            id = %note.id(),
            category = %note.category(),
            author = %note.author(),
            "Adding note"
        );
        self.notes.insert(0, note);
        self.save_notes();
        Ok(())
    }

    /// Delete a note
    ///
    /// Returns whether a note was removed; deleting an unknown ID is a no-op.
    pub fn delete_note(&mut self, id: Uuid) -> JournalResult<bool> {
        self.gate.ensure_unlocked()?;
        let before = self.notes.len();
        self.notes.retain(|n| n.id() != id);

        let removed = self.notes.len() != before;
        if removed {
            debug!(%id, "Deleted note");
            self.save_notes();
        }
        Ok(removed)
    }

    /// Add one reaction of `kind` to a note
    ///
    /// Returns the new count, or `None` if no note has this ID.
    pub fn react(&mut self, id: Uuid, kind: ReactionKind) -> JournalResult<Option<u64>> {
        self.gate.ensure_unlocked()?;
        let Some(note) = self.notes.iter_mut().find(|n| n.id() == id) else {
            return Ok(None);
        };

        let count = note.react(kind);
        debug!(%id, reaction = %kind, count, "Reacted to note");
        self.save_notes();
        Ok(Some(count))
    }

    /// Notes passing `filter`, in collection order
    pub fn filter(&self, filter: &NoteFilter) -> JournalResult<Vec<&Note>> {
        self.gate.ensure_unlocked()?;
        Ok(filter.apply(&self.notes))
    }

    /// Aggregate counts over all notes
    pub fn stats(&self) -> JournalResult<Stats> {
        self.gate.ensure_unlocked()?;
        Ok(Stats::compute(&self.notes))
    }

    // ==================== Gallery ====================

    pub fn gallery(&self) -> JournalResult<&Gallery> {
        self.gate.ensure_unlocked()?;
        Ok(&self.gallery)
    }

    /// Add a cover image at the front of the gallery
    pub fn add_cover(&mut self, image: impl Into<String>) -> JournalResult<()> {
        self.gate.ensure_unlocked()?;
        self.gallery.add_cover(image);
        debug!(len = self.gallery.len(), "Added cover image");
        self.save_gallery();
        Ok(())
    }

    pub fn rotate_next(&mut self) -> JournalResult<()> {
        self.gate.ensure_unlocked()?;
        if !self.gallery.is_empty() {
            self.gallery.rotate_next();
            self.save_gallery();
        }
        Ok(())
    }

    pub fn rotate_prev(&mut self) -> JournalResult<()> {
        self.gate.ensure_unlocked()?;
        if !self.gallery.is_empty() {
            self.gallery.rotate_prev();
            self.save_gallery();
        }
        Ok(())
    }

    // ==================== Import / Export ====================

    /// Serialize every note as an exchange document
    pub fn export(&self) -> JournalResult<String> {
        self.gate.ensure_unlocked()?;
        Ok(transfer::export_notes(&self.notes)?)
    }

    /// Replace all notes with the contents of an exchange document
    ///
    /// Returns `false`, leaving the journal untouched, when the document is
    /// not an array of notes.
    pub fn import(&mut self, document: &str) -> JournalResult<bool> {
        self.gate.ensure_unlocked()?;
        let Some(notes) = transfer::parse_notes(document) else {
            return Ok(false);
        };

        info!(count = notes.len(), "Imported notes");
        self.notes = notes;
        self.save_notes();
        Ok(true)
    }

    fn save_notes(&mut self) {
        storage::save(&mut self.backend, NOTES_KEY, &self.notes);
    }

    fn save_gallery(&mut self) {
        storage::save(&mut self.backend, GALLERY_KEY, &self.gallery);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::APP_PIN;
    use crate::gallery::GALLERY_CAPACITY;
    use crate::models::{Category, Profile};
    use crate::storage::{MemoryStore, StorageError, StorageResult};
    use tempfile::TempDir;

    fn unlocked() -> Journal<MemoryStore> {
        let mut journal = Journal::with_backend(MemoryStore::new());
        journal.unlock(APP_PIN).unwrap();
        journal
    }

    fn note(category: Category, text: &str) -> Note {
        Note::new(Profile::Mj, category, text, None).unwrap()
    }

    /// Simulate closing and reopening the app
    fn restart(journal: Journal<MemoryStore>) -> Journal<MemoryStore> {
        Journal::with_backend(journal.into_backend())
    }

    #[test]
    fn test_starts_locked() {
        let journal = Journal::with_backend(MemoryStore::new());
        assert_eq!(journal.access_state(), AccessState::Locked);

        assert!(matches!(journal.notes(), Err(JournalError::Locked)));
        assert!(matches!(journal.stats(), Err(JournalError::Locked)));
        assert!(matches!(journal.gallery(), Err(JournalError::Locked)));
        assert!(matches!(journal.export(), Err(JournalError::Locked)));
    }

    #[test]
    fn test_locked_rejects_mutations() {
        let mut journal = Journal::with_backend(MemoryStore::new());
        let n = note(Category::Favores, "x");
        let id = n.id();

        assert!(matches!(journal.add_note(n), Err(JournalError::Locked)));
        assert!(matches!(journal.delete_note(id), Err(JournalError::Locked)));
        assert!(matches!(
            journal.react(id, ReactionKind::Heart),
            Err(JournalError::Locked)
        ));
        assert!(matches!(journal.add_cover("img"), Err(JournalError::Locked)));
        assert!(matches!(journal.import("[]"), Err(JournalError::Locked)));

        // Nothing was written
        assert!(journal.into_backend().is_empty());
    }

    #[test]
    fn test_unlock_persists_across_restart() {
        let mut journal = Journal::with_backend(MemoryStore::new());

        assert!(matches!(
            journal.unlock("0000"),
            Err(JournalError::IncorrectPin)
        ));
        assert_eq!(journal.access_state(), AccessState::Locked);

        let journal = restart(journal);
        assert_eq!(journal.access_state(), AccessState::Locked);

        let mut journal = journal;
        journal.unlock(APP_PIN).unwrap();
        assert_eq!(journal.access_state(), AccessState::Unlocked);

        let journal = restart(journal);
        assert_eq!(journal.access_state(), AccessState::Unlocked);
        assert!(journal.notes().unwrap().is_empty());
    }

    #[test]
    fn test_unlock_when_already_unlocked() {
        let mut journal = unlocked();
        journal.unlock("wrong").unwrap();
        assert!(journal.is_unlocked());
    }

    #[test]
    fn test_add_is_newest_first() {
        let mut journal = unlocked();
        let notes: Vec<Note> = (0..5)
            .map(|i| note(Category::Carinitos, &format!("note {}", i)))
            .collect();
        let ids: Vec<Uuid> = notes.iter().map(|n| n.id()).collect();

        for n in notes {
            journal.add_note(n).unwrap();
        }

        let stored: Vec<Uuid> = journal.notes().unwrap().iter().map(|n| n.id()).collect();
        let expected: Vec<Uuid> = ids.into_iter().rev().collect();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut journal = unlocked();
        let a = note(Category::Favores, "a");
        let b = note(Category::Favores, "b");
        let a_id = a.id();
        journal.add_note(a).unwrap();
        journal.add_note(b).unwrap();

        assert!(journal.delete_note(a_id).unwrap());
        assert!(!journal.delete_note(a_id).unwrap());
        assert_eq!(journal.notes().unwrap().len(), 1);
        assert!(journal.get_note(a_id).unwrap().is_none());

        // Unknown ID
        assert!(!journal.delete_note(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn test_add_rejects_reused_id() {
        let mut journal = unlocked();
        let a = note(Category::Favores, "a");
        let a_id = a.id();
        journal.add_note(a.clone()).unwrap();

        assert!(matches!(
            journal.add_note(a),
            Err(JournalError::DuplicateNote(id)) if id == a_id
        ));
        assert_eq!(journal.notes().unwrap().len(), 1);

        // One delete removes the one note
        assert!(journal.delete_note(a_id).unwrap());
        assert!(journal.notes().unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_blank_record() {
        let mut journal = unlocked();
        let blank: Note = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "texto": "",
            "categoria": "favores",
            "fecha": "2024-02-14T09:30:00Z",
            "autor": "luis"
        }))
        .unwrap();

        assert!(matches!(
            journal.add_note(blank),
            Err(JournalError::EmptyNote)
        ));
        assert!(journal.notes().unwrap().is_empty());
    }

    #[test]
    fn test_react_counts_exactly() {
        let mut journal = unlocked();
        let a = note(Category::Carinitos, "a");
        let b = note(Category::Carinitos, "b");
        let (a_id, b_id) = (a.id(), b.id());
        journal.add_note(a).unwrap();
        journal.add_note(b).unwrap();

        for i in 1..=7 {
            assert_eq!(journal.react(a_id, ReactionKind::Star).unwrap(), Some(i));
        }

        let a = journal.get_note(a_id).unwrap().unwrap();
        assert_eq!(a.reactions().get(ReactionKind::Star), 7);
        assert_eq!(a.reactions().get(ReactionKind::Heart), 0);
        assert_eq!(a.reactions().get(ReactionKind::Sun), 0);
        assert_eq!(a.reactions().get(ReactionKind::Music), 0);

        let b = journal.get_note(b_id).unwrap().unwrap();
        assert_eq!(b.reactions().total(), 0);
    }

    #[test]
    fn test_react_unknown_note_is_noop() {
        let mut journal = unlocked();
        journal.add_note(note(Category::Favores, "a")).unwrap();

        assert_eq!(
            journal.react(Uuid::new_v4(), ReactionKind::Heart).unwrap(),
            None
        );
        assert_eq!(journal.stats().unwrap().reactions_total, 0);
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let mut journal = unlocked();
        journal.add_note(note(Category::Favores, "pan")).unwrap();
        journal.add_note(note(Category::Recuerdos, "mar")).unwrap();
        let before = journal.notes().unwrap().to_vec();

        let filter = NoteFilter::new().with_query("PAN");
        let first: Vec<Uuid> = journal.filter(&filter).unwrap().iter().map(|n| n.id()).collect();
        let second: Vec<Uuid> = journal.filter(&filter).unwrap().iter().map(|n| n.id()).collect();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(journal.notes().unwrap(), before.as_slice());
    }

    #[test]
    fn test_example_scenario() {
        let mut journal = unlocked();

        let a = note(Category::Carinitos, "A");
        let b = note(Category::Favores, "B");
        let (a_id, b_id) = (a.id(), b.id());
        journal.add_note(a).unwrap();
        journal.add_note(b).unwrap();

        let order: Vec<Uuid> = journal.notes().unwrap().iter().map(|n| n.id()).collect();
        assert_eq!(order, vec![b_id, a_id]);

        let filtered = journal
            .filter(&NoteFilter::new().with_category(Category::Carinitos))
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id(), a_id);

        journal.react(a_id, ReactionKind::Heart).unwrap();
        journal.react(a_id, ReactionKind::Heart).unwrap();
        let a = journal.get_note(a_id).unwrap().unwrap();
        assert_eq!(a.reactions().get(ReactionKind::Heart), 2);

        let stats = journal.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.count_for(Category::Carinitos), 1);
        assert_eq!(stats.count_for(Category::Favores), 1);
        assert_eq!(stats.reactions_total, 2);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut journal = unlocked();
        let with_photo = Note::new(
            Profile::Luis,
            Category::Recuerdos,
            "",
            Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        )
        .unwrap();
        let photo_id = with_photo.id();
        journal.add_note(with_photo).unwrap();
        journal.add_note(note(Category::Favores, "café")).unwrap();
        journal.react(photo_id, ReactionKind::Music).unwrap();

        let original = journal.notes().unwrap().to_vec();
        let document = journal.export().unwrap();

        // Import into a fresh journal
        let mut other = unlocked();
        other.add_note(note(Category::Reminders, "to be replaced")).unwrap();
        assert!(other.import(&document).unwrap());
        assert_eq!(other.notes().unwrap(), original.as_slice());

        // And back into the original
        assert!(journal.import(&document).unwrap());
        assert_eq!(journal.notes().unwrap(), original.as_slice());
    }

    #[test]
    fn test_import_malformed_is_ignored() {
        let mut journal = unlocked();
        journal.add_note(note(Category::Favores, "keep me")).unwrap();
        let before = journal.notes().unwrap().to_vec();

        for doc in ["", "{}", "{\"notes\": []}", "[1,2]", "nonsense"] {
            assert!(!journal.import(doc).unwrap());
            assert_eq!(journal.notes().unwrap(), before.as_slice());
        }
    }

    #[test]
    fn test_import_with_repeated_ids_is_ignored() {
        let mut journal = unlocked();
        journal.add_note(note(Category::Favores, "keep me")).unwrap();
        let before = journal.notes().unwrap().to_vec();

        let n = note(Category::Recuerdos, "twice");
        let doc = transfer::export_notes(&[n.clone(), n]).unwrap();

        assert!(!journal.import(&doc).unwrap());
        assert_eq!(journal.notes().unwrap(), before.as_slice());
    }

    #[test]
    fn test_import_empty_array_clears() {
        let mut journal = unlocked();
        journal.add_note(note(Category::Favores, "a")).unwrap();

        assert!(journal.import("[]").unwrap());
        assert!(journal.notes().unwrap().is_empty());
    }

    #[test]
    fn test_gallery_operations() {
        let mut journal = unlocked();
        for i in 0..25 {
            journal.add_cover(format!("img{}", i)).unwrap();
        }
        assert_eq!(journal.gallery().unwrap().len(), GALLERY_CAPACITY);
        assert_eq!(journal.gallery().unwrap().cover(), Some("img24"));

        let before = journal.gallery().unwrap().clone();
        journal.rotate_next().unwrap();
        assert_eq!(journal.gallery().unwrap().cover(), Some("img23"));
        journal.rotate_prev().unwrap();
        assert_eq!(journal.gallery().unwrap(), &before);
    }

    #[test]
    fn test_state_persists_across_restart() {
        let mut journal = unlocked();
        let n = note(Category::Recuerdos, "persist");
        let id = n.id();
        journal.add_note(n).unwrap();
        journal.react(id, ReactionKind::Sun).unwrap();
        journal.add_cover("cover-a").unwrap();
        journal.add_cover("cover-b").unwrap();
        journal.rotate_next().unwrap();

        let journal = restart(journal);
        let stored = journal.get_note(id).unwrap().unwrap();
        assert_eq!(stored.text(), "persist");
        assert_eq!(stored.reactions().get(ReactionKind::Sun), 1);
        assert_eq!(journal.gallery().unwrap().images(), &["cover-a", "cover-b"]);
    }

    #[test]
    fn test_file_backed_journal() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };

        {
            let mut journal = Journal::open_with_config(&config);
            journal.unlock(APP_PIN).unwrap();
            journal.add_note(note(Category::Favores, "on disk")).unwrap();
        }

        assert!(temp_dir.path().join("amorinhos_diario_v2.json").exists());
        assert!(temp_dir.path().join("amorinhos_pin_ok.json").exists());

        let journal = Journal::open_with_config(&config);
        assert!(journal.is_unlocked());
        assert_eq!(journal.notes().unwrap()[0].text(), "on disk");
    }

    #[test]
    fn test_corrupted_storage_falls_back_to_defaults() {
        let mut backend = MemoryStore::new();
        backend.set(NOTES_KEY, "[{\"broken\": ").unwrap();
        backend.set(GALLERY_KEY, "42").unwrap();
        backend.set(ACCESS_KEY, "true").unwrap();

        let journal = Journal::with_backend(backend);
        assert!(journal.is_unlocked());
        assert!(journal.notes().unwrap().is_empty());
        assert!(journal.gallery().unwrap().is_empty());
    }

    /// Backend that reads fine but refuses every write
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_write_failures_keep_memory_state() {
        let mut journal = Journal::with_backend(ReadOnlyStore::default());
        journal.unlock(APP_PIN).unwrap();
        journal.add_note(note(Category::Favores, "only in memory")).unwrap();
        journal.add_cover("img").unwrap();

        assert_eq!(journal.notes().unwrap().len(), 1);
        assert_eq!(journal.gallery().unwrap().len(), 1);

        // Nothing reached storage, so a restart comes back locked and empty
        let journal = Journal::with_backend(journal.into_backend());
        assert!(!journal.is_unlocked());
    }
}
