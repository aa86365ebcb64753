//! Export and import of the note collection
//!
//! The exchange format is a pretty-printed JSON array of notes, using the
//! same field names as the persisted store.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::models::Note;

/// Default file name for exports
pub const EXPORT_FILE_NAME: &str = "amorinhos_diario.json";

/// Serialize notes as an exchange document
pub fn export_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(notes)
}

/// Parse an exchange document
///
/// Returns `None` unless the document is a JSON array of note records with
/// distinct IDs, each carrying text or a photo. Callers treat `None` as
/// "ignore this file".
pub fn parse_notes(document: &str) -> Option<Vec<Note>> {
    let value: Value = match serde_json::from_str(document) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Import document is not JSON");
            return None;
        }
    };

    if !value.is_array() {
        debug!("Import document is not an array");
        return None;
    }

    let notes = match serde_json::from_value::<Vec<Note>>(value) {
        Ok(notes) => notes,
        Err(e) => {
            debug!(error = %e, "Import document contains records that are not notes");
            return None;
        }
    };

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id()) {
            debug!(id = %note.id(), "Import document repeats a note ID");
            return None;
        }
        if !note.has_content() {
            debug!(id = %note.id(), "Import document contains an empty note");
            return None;
        }
    }

    Some(notes)
}
