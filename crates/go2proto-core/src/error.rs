//! Error types for loading type graphs.
//!
//! The transformation itself cannot fail; these cover the boundary where a
//! serialized graph or a mapping table is read.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Go2ProtoError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
