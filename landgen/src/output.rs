//! Output sink for the generated document

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::storage::Storage;

#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Writes the artifact verbatim, replacing whatever was at `path`
pub fn save(storage: &impl Storage, path: &Path, artifact: &str) -> Result<(), WriteError> {
    debug!(?path, bytes = artifact.len(), "save: called");
    storage.write(path, artifact).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// First `max_chars` characters of `text`, followed by "..."
pub fn preview(text: &str, max_chars: usize) -> String {
    let cut = text.char_indices().nth(max_chars).map(|(i, _)| i).unwrap_or(text.len());
    format!("{}...", &text[..cut])
}
