//! Store error types.

use std::path::PathBuf;

use crate::domain::RecordId;

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A document with the same identifier already exists
    #[error("{collection} document {id} already exists")]
    Duplicate {
        collection: &'static str,
        id: RecordId,
    },

    /// Reading or writing a collection file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file could not be encoded or decoded
    #[error("failed to (de)serialize {collection}: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
