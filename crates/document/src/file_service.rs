//! File service: the I/O collaborator for documents.
//!
//! Loads a path into a fresh [`Document`] and persists a Document's current
//! buffer text. The buffer itself knows nothing about paths or encodings;
//! everything filesystem-shaped lives here. Text is read and written as
//! plain UTF-8 with no byte-order mark.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Document;

/// Errors returned by the file service.
#[derive(Debug, Error)]
pub enum FileServiceError {
    /// `save` was called on a document with no stored path and no explicit
    /// target path.
    #[error("document has no associated path and none was supplied")]
    NoPath,

    /// The underlying filesystem operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Opens the file at `path` into a fresh document.
///
/// The document starts clean, with `path` as its storage path.
pub fn open(path: impl Into<PathBuf>) -> Result<Document, FileServiceError> {
    let path = path.into();
    let text = fs::read_to_string(&path)?;
    Ok(Document::new(Some(path), &text))
}

/// Persists the document's current text.
///
/// The target is `path` if supplied, otherwise the document's stored path;
/// with neither, fails with [`FileServiceError::NoPath`] without touching
/// the document. On success the document's path is updated to the target
/// and its dirty flag cleared.
pub fn save(document: &mut Document, path: Option<&Path>) -> Result<(), FileServiceError> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => document
            .path()
            .ok_or(FileServiceError::NoPath)?
            .to_path_buf(),
    };

    fs::write(&target, document.buffer().content())?;
    document.mark_saved(Some(target));
    Ok(())
}
