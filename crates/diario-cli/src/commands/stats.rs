//! Stats command handler

use anyhow::Result;

use diario_core::Journal;

use crate::output::Output;

/// Show note and reaction totals
pub fn show(journal: &Journal, output: &Output) -> Result<()> {
    let stats = journal.stats()?;
    output.print_stats(&stats);
    Ok(())
}
