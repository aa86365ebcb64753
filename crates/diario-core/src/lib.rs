//! Diario Core Library
//!
//! This crate provides the core functionality for Diario, a shared journal
//! for two people: short notes with optional photos, filed into categories,
//! with emoji reactions and a rotating cover gallery.
//!
//! # Architecture
//!
//! - **Journal**: the single state container; every change goes through it
//! - **Storage**: best-effort key-value persistence (one JSON value per key)
//!
//! Derived views (filtered timeline, counts) are recomputed from the journal
//! on every read.
//!
//! # Quick Start
//!
//! ```text
//! let mut journal = Journal::open()?;
//! journal.unlock("1309")?;
//!
//! let note = Note::new(Profile::Luis, Category::Favores, "¿Compras pan?", None)?;
//! journal.add_note(note)?;
//!
//! let favores = journal.filter(&NoteFilter::new().with_category(Category::Favores))?;
//! ```
//!
//! # Modules
//!
//! - `journal`: State container (main entry point)
//! - `models`: Notes, categories, profiles and reactions
//! - `view`: Filtering and aggregate counts
//! - `gallery`: Bounded cover image list
//! - `access`: PIN gate
//! - `transfer`: JSON export and import
//! - `photo`: Data URL encoding for images
//! - `storage`: Key-value persistence
//! - `config`: Application configuration

pub mod access;
pub mod config;
pub mod error;
pub mod gallery;
pub mod journal;
pub mod models;
pub mod photo;
pub mod storage;
pub mod transfer;
pub mod view;

pub use access::{AccessGate, AccessState, APP_PIN};
pub use config::Config;
pub use error::{JournalError, JournalResult};
pub use gallery::{Gallery, GALLERY_CAPACITY};
pub use journal::Journal;
pub use models::{Category, Note, ParseError, Profile, ReactionKind, Reactions};
pub use photo::PhotoError;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use transfer::EXPORT_FILE_NAME;
pub use view::{CategoryFilter, NoteFilter, Stats};
