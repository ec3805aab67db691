use std::path::PathBuf;

use thiserror::Error;

/// Why a whole source collection could not be converted into items.
///
/// Per-record interval problems are not errors: those records are dropped
/// and conversion continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no '{0}' accessor configured for appointment records")]
    MissingAccessor(&'static str),
    #[error("null element at position {index} in the appointment collection")]
    NullElement { index: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize week layout: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
