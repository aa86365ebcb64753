//! Export and import handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use diario_core::{Journal, EXPORT_FILE_NAME};

use crate::output::Output;

/// Write every note to a JSON file
pub fn export(journal: &Journal, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    let document = journal.export()?;

    fs::write(&path, document).with_context(|| format!("Failed to write {:?}", path))?;

    let count = journal.notes()?.len();
    output.success(&format!("Exported {} note(s) to {}", count, path.display()));
    Ok(())
}

/// Replace all notes with the contents of a JSON export
///
/// Files that are not an array of notes are ignored and the journal is left
/// as it was.
pub fn import(journal: &mut Journal, path: PathBuf, output: &Output) -> Result<()> {
    let document =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;

    if journal.import(&document)? {
        let count = journal.notes()?.len();
        output.success(&format!("Imported {} note(s) from {}", count, path.display()));
    } else {
        debug!(path = %path.display(), "Ignored import file");
    }
    Ok(())
}
