//! Error types for cildep.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while scanning the policy store.
///
/// Per-artifact read and decompression failures are recoverable and handled
/// inside the scanner (the artifact is skipped with a diagnostic); these
/// variants cover the storage-level failures that make a scan meaningless.
#[derive(Debug, Error)]
pub enum CildepError {
    #[error("policy store {path} is not accessible: {source}")]
    BaseDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk policy store: {0}")]
    Walk(#[from] ignore::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CildepError>;
