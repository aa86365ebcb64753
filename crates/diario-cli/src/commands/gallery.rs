//! Gallery command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use diario_core::photo;
use diario_core::{Journal, GALLERY_CAPACITY};

use crate::output::Output;

/// Add an image file as the new cover
pub fn add(journal: &mut Journal, image: PathBuf, output: &Output) -> Result<()> {
    let data_url = photo::encode_file(&image).context("Failed to read cover image")?;
    let was_full = journal.gallery()?.len() >= GALLERY_CAPACITY;

    journal.add_cover(data_url)?;

    output.success(&format!("Added cover photo {}", image.display()));
    if was_full {
        output.message(&format!(
            "The gallery keeps {} photos; the oldest one was removed.",
            GALLERY_CAPACITY
        ));
    }
    Ok(())
}

/// List the gallery, cover first
pub fn list(journal: &Journal, output: &Output) -> Result<()> {
    output.print_gallery(journal.gallery()?);
    Ok(())
}

/// Show the next photo as the cover
pub fn next(journal: &mut Journal, output: &Output) -> Result<()> {
    journal.rotate_next()?;
    output.print_gallery(journal.gallery()?);
    Ok(())
}

/// Show the previous photo as the cover
pub fn prev(journal: &mut Journal, output: &Output) -> Result<()> {
    journal.rotate_prev()?;
    output.print_gallery(journal.gallery()?);
    Ok(())
}
