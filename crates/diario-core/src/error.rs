//! Journal error types

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by journal operations
#[derive(Error, Debug)]
pub enum JournalError {
    /// The PIN has not been entered on this device yet
    #[error("Journal is locked. Enter the PIN to unlock it.")]
    Locked,

    /// The submitted PIN does not match
    #[error("Incorrect PIN")]
    IncorrectPin,

    /// A note was composed with neither text nor a photo
    #[error("A note needs some text or a photo")]
    EmptyNote,

    /// A note with this ID is already in the journal
    #[error("Note {0} is already in the journal")]
    DuplicateNote(Uuid),

    /// Notes could not be encoded for export
    #[error("Failed to encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}

impl JournalError {
    /// Whether retrying the same action can succeed after user input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, JournalError::Locked | JournalError::IncorrectPin)
    }
}

/// Result type for journal operations
pub type JournalResult<T> = Result<T, JournalError>;
