//! JSON encoding of the store and whole-file persistence.
//!
//! Decoding stops at a parsed [`Value`]; turning that into a store is the
//! job of [`migrate`](crate::migrate), so that older layouts can be handled.

use crate::{Result, WealthStore};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Indentation of written data files.
const INDENT: &[u8] = b"    ";

/// Encodes `store` as indented JSON.
///
/// Categories appear in declaration order followed by any preserved unknown
/// sections; record attributes keep their insertion order.
///
/// # Errors
///
/// Returns [`crate::WealthError::Json`] if a value cannot be encoded.
pub fn serialize(store: &WealthStore) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    store.serialize(&mut serializer)?;
    Ok(buf)
}

/// Parses JSON bytes into a document without interpreting its layout.
///
/// # Errors
///
/// Returns [`crate::WealthError::Json`] if `bytes` are not valid JSON.
pub fn deserialize(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads and parses the data file at `path`.
///
/// # Errors
///
/// Returns [`crate::WealthError::Io`] if the file cannot be read, or
/// [`crate::WealthError::Json`] if it is not valid JSON.
pub fn read_document(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)?;
    deserialize(&bytes)
}

/// Writes `store` to `path`, replacing the whole file.
///
/// The data goes to a temporary file in the same directory first, which is
/// then renamed over `path`; a failed write leaves the old file in place.
///
/// # Errors
///
/// Returns [`crate::WealthError::Io`] if the file cannot be written or
/// renamed, or [`crate::WealthError::Json`] if encoding fails.
pub fn write_store(path: &Path, store: &WealthStore) -> Result<()> {
    let bytes = serialize(store)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
