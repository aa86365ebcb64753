//! Note command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use uuid::Uuid;

use diario_core::photo;
use diario_core::{
    Category, CategoryFilter, Config, Journal, KeyValueStore, Note, NoteFilter, Profile,
    ReactionKind,
};

use crate::editor::{compose_note, confirm};
use crate::output::{short_id, Output};

/// Compose and post a new note
pub fn add(
    journal: &mut Journal,
    config: &Config,
    text: Option<String>,
    category: Category,
    author: Option<Profile>,
    photo_path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let author = author.unwrap_or(config.default_author);

    let photo = photo_path
        .map(|path| photo::encode_file(&path))
        .transpose()
        .context("Failed to attach photo")?;

    let text = match text {
        Some(t) => t,
        None if photo.is_some() => String::new(),
        None => compose_note(author, category)?,
    };

    let note = Note::new(author, category, text, photo)?;
    let id = note.id();
    journal.add_note(note).context("Failed to post note")?;

    output.success(&format!("Posted note {}", &id.to_string()[..8]));
    if let Some(note) = journal.get_note(id)? {
        output.print_note(note);
    }
    Ok(())
}

/// List notes, newest first, optionally filtered
pub fn list(
    journal: &Journal,
    category: CategoryFilter,
    query: Option<String>,
    output: &Output,
) -> Result<()> {
    let filter = NoteFilter::new()
        .with_category(category)
        .with_query(query.unwrap_or_default());
    let notes = journal.filter(&filter)?;
    output.print_notes(&notes);
    Ok(())
}

/// Show a single note
pub fn show(journal: &Journal, id: String, output: &Output) -> Result<()> {
    let note = find_note(journal, &id)?;
    output.print_note(note);
    Ok(())
}

/// Add a reaction to a note
pub fn react(journal: &mut Journal, id: String, kind: ReactionKind, output: &Output) -> Result<()> {
    let uuid = resolve_note_id(journal, &id)?;

    let count = journal
        .react(uuid, kind)?
        .ok_or_else(|| anyhow!("Note not found: {}", id))?;

    output.success(&format!(
        "{} {} on note {} ({})",
        kind.emoji(),
        kind.label(),
        &uuid.to_string()[..8],
        count
    ));
    Ok(())
}

/// Delete a note
pub fn delete(journal: &mut Journal, id: String, output: &Output) -> Result<()> {
    let note = find_note(journal, &id)?;
    let uuid = note.id();

    if output.should_prompt() {
        println!(
            "Delete note: {} - {}",
            short_id(note),
            preview(note).replace('\n', " ")
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    journal.delete_note(uuid).context("Failed to delete note")?;
    output.success(&format!("Deleted note: {}", &uuid.to_string()[..8]));
    Ok(())
}

/// Save the photo attached to a note as an image file
pub fn save_photo(
    journal: &Journal,
    id: String,
    out: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let note = find_note(journal, &id)?;
    let data_url = note
        .photo()
        .ok_or_else(|| anyhow!("Note {} has no photo", short_id(note)))?;

    let (mime, bytes) = photo::decode(data_url).context("Stored photo is not readable")?;
    let path = out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}.{}",
            short_id(note),
            photo::extension_for_mime(&mime)
        ))
    });

    fs::write(&path, &bytes).with_context(|| format!("Failed to write {:?}", path))?;
    output.success(&format!("Saved photo to {}", path.display()));
    Ok(())
}

fn find_note<'a, S: KeyValueStore>(journal: &'a Journal<S>, id: &str) -> Result<&'a Note> {
    let uuid = resolve_note_id(journal, id)?;
    journal
        .get_note(uuid)?
        .ok_or_else(|| anyhow!("Note not found: {}", id))
}

fn preview(note: &Note) -> String {
    if note.text().is_empty() {
        return "(photo)".to_string();
    }
    let mut chars = note.text().chars();
    let head: String = chars.by_ref().take(50).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Parse a note ID (supports full UUID or prefix)
///
/// A blank ID is rejected: it would be a prefix of every note.
fn resolve_note_id<S: KeyValueStore>(journal: &Journal<S>, id: &str) -> Result<Uuid> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Note ID must not be empty");
    }

    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let matches: Vec<&Note> = journal
        .notes()?
        .iter()
        .filter(|n| n.id().to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No note found matching: {}", id),
        1 => Ok(matches[0].id()),
        _ => {
            eprintln!("Multiple notes match '{}':", id);
            for note in &matches {
                eprintln!("  {} - {}", note.id(), preview(note));
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diario_core::{MemoryStore, APP_PIN};

    fn journal_with(texts: &[&str]) -> Journal<MemoryStore> {
        let mut journal = Journal::with_backend(MemoryStore::new());
        journal.unlock(APP_PIN).unwrap();
        for text in texts {
            let note = Note::new(Profile::Mj, Category::Carinitos, *text, None).unwrap();
            journal.add_note(note).unwrap();
        }
        journal
    }

    #[test]
    fn test_resolve_blank_id_is_rejected() {
        let journal = journal_with(&["only note"]);

        for id in ["", "   ", "\t"] {
            let err = resolve_note_id(&journal, id).unwrap_err();
            assert!(err.to_string().contains("must not be empty"));
        }
    }

    #[test]
    fn test_resolve_full_id_and_prefix() {
        let journal = journal_with(&["only note"]);
        let id = journal.notes().unwrap()[0].id();
        let full = id.to_string();

        assert_eq!(resolve_note_id(&journal, &full).unwrap(), id);
        assert_eq!(resolve_note_id(&journal, &full[..6]).unwrap(), id);
        assert_eq!(resolve_note_id(&journal, &format!(" {} ", &full[..6])).unwrap(), id);
    }

    #[test]
    fn test_resolve_unknown_prefix() {
        let journal = journal_with(&["a", "b"]);
        assert!(resolve_note_id(&journal, "zzzz").is_err());
    }

    #[test]
    fn test_preview_is_char_safe() {
        let text = "ñ".repeat(60);
        let journal = journal_with(&[text.as_str()]);
        let note = &journal.notes().unwrap()[0];
        let shown = preview(note);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 53);
    }
}
