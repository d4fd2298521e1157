//! Error types for snapshot loading.
//!
//! The engine itself never errors: lookups return absence and malformed
//! dates fail closed. Loading a snapshot from disk is the one fallible
//! boundary in the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a snapshot directory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
