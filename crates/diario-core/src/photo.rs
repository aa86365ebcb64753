//! Inline photo payloads
//!
//! Photos live inside notes and the gallery as `data:<mime>;base64,<data>`
//! URLs, so a journal is a self-contained set of JSON values.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Failed to read image '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image '{0}' is empty")]
    Empty(PathBuf),

    #[error("Not a data URL")]
    NotDataUrl,

    #[error("Only base64 data URLs are supported")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Guess a MIME type from the file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// File extension for a MIME type, used when writing a photo back out
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

/// Encode raw bytes as a data URL
pub fn encode_bytes(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file and encode it as a data URL
pub fn encode_file(path: &Path) -> Result<String, PhotoError> {
    let bytes = fs::read(path).map_err(|source| PhotoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(PhotoError::Empty(path.to_path_buf()));
    }
    Ok(encode_bytes(mime_for_path(path), &bytes))
}

/// Split a data URL into its MIME type and decoded bytes
pub fn decode(data_url: &str) -> Result<(String, Vec<u8>), PhotoError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(PhotoError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotDataUrl)?;
    let header = header.strip_suffix(";base64").ok_or(PhotoError::NotBase64)?;

    let mime = header.split(';').next().unwrap_or_default();
    let mime = if mime.is_empty() {
        "text/plain"
    } else {
        mime
    };

    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}
