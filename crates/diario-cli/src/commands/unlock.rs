//! PIN gate handlers

use anyhow::{bail, Result};

use diario_core::Journal;

use crate::editor::{is_interactive, read_line};
use crate::output::Output;

/// Unlock the journal with a PIN from the command line or a prompt
pub fn unlock(journal: &mut Journal, pin: Option<String>, output: &Output) -> Result<()> {
    if journal.is_unlocked() {
        output.message("Journal is already unlocked.");
        return Ok(());
    }

    match pin {
        Some(pin) => journal.unlock(&pin)?,
        None => {
            if !is_interactive() {
                bail!("No PIN given. Pass it as an argument: diario unlock <PIN>");
            }
            prompt_until_unlocked(journal)?;
        }
    }

    output.success("Journal unlocked");
    Ok(())
}

/// Make sure the journal is open before running a command
///
/// On a terminal the PIN is asked for; otherwise the command fails.
pub fn ensure_unlocked(journal: &mut Journal, output: &Output) -> Result<()> {
    if journal.is_unlocked() {
        return Ok(());
    }

    if !output.should_prompt() || !is_interactive() {
        bail!("Journal is locked. Run `diario unlock` first.");
    }

    println!("Hola MJ & Luis 💛");
    println!("Enter the PIN to open your journal.");
    println!();
    prompt_until_unlocked(journal)
}

/// Ask for the PIN until it matches or input ends
fn prompt_until_unlocked(journal: &mut Journal) -> Result<()> {
    loop {
        let Some(pin) = read_line("PIN: ")? else {
            bail!("No PIN entered");
        };

        match journal.unlock(&pin) {
            Ok(()) => return Ok(()),
            Err(e) if e.is_recoverable() => eprintln!("✗ {}", e),
            Err(e) => return Err(e.into()),
        }
    }
}
