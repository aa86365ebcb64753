//! Storage layer
//!
//! Local key-value persistence for the journal.
//!
//! ## Layout
//!
//! - **Backend** (`KeyValueStore`): raw string get/set per key
//! - **Persisted** (`load` / `save`): JSON encoding with best-effort
//!   semantics; failures fall back to defaults and are only logged
//!
//! Three keys are used, each holding one JSON value.

pub mod backend;
pub mod error;
pub mod persisted;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StorageError, StorageResult};
pub use persisted::{load, save};

/// Key holding the note collection (array of notes)
pub const NOTES_KEY: &str = "amorinhos_diario_v2";

/// Key holding the gallery (array of image data URLs)
pub const GALLERY_KEY: &str = "amorinhos_galeria_v1";

/// Key holding the access flag (boolean)
pub const ACCESS_KEY: &str = "amorinhos_pin_ok";
