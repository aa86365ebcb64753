//! Typed, best-effort access to stored values
//!
//! `load` and `save` never fail outward. A missing, unreadable or corrupted
//! value loads as the supplied default; a failed write is logged and dropped,
//! leaving the caller's in-memory value as the only copy.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::storage::backend::KeyValueStore;
use crate::storage::error::{StorageError, StorageResult};

/// Load the value stored under `key`, or `default`
pub fn load<T, S>(backend: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match try_load(backend, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "No stored value, using default");
            default
        }
        Err(e) => {
            warn!(
                key,
                error = %e,
                suggestion = e.recovery_suggestion().unwrap_or(""),
                "Failed to load stored value, using default"
            );
            default
        }
    }
}

/// Serialize `value` and store it under `key`
///
/// Returns whether the value was written.
pub fn save<T, S>(backend: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match try_save(backend, key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                key,
                error = %e,
                suggestion = e.recovery_suggestion().unwrap_or(""),
                "Failed to save value"
            );
            false
        }
    }
}

fn try_load<T, S>(backend: &S, key: &str) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };
    // An empty value reads the same as no value
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupted {
            key: key.to_string(),
            source,
        })
}

fn try_save<T, S>(backend: &mut S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    backend.set(key, &raw)
}
