//! Error types for the reshape tool.

use crate::types::ContentHash;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by scanning, manifest handling and linking.
///
/// Fatal kinds abort the whole invocation. Recoverable kinds are reported per
/// file or per record and collected into the run's report instead of
/// propagating.
#[derive(Debug, Error)]
pub enum ReshapeError {
    #[error("Invalid root {path:?}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Unreadable file {path:?}: {reason}")]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    #[error("Hash collision for {hash} ({hash:016x}): {} source files share it", .sources.len())]
    HashCollision {
        hash: ContentHash,
        sources: Vec<PathBuf>,
    },

    #[error("Link conflict at {target:?}: a different file already exists")]
    LinkConflict { target: PathBuf },

    #[error("Cross-device link from {source_path:?} to {target:?}")]
    CrossDeviceLink { source_path: PathBuf, target: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReshapeError {
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ReshapeError::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a run rather than skipping one item.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ReshapeError::UnreadableFile { .. }
                | ReshapeError::HashCollision { .. }
                | ReshapeError::LinkConflict { .. }
                | ReshapeError::CrossDeviceLink { .. }
        )
    }
}

impl From<serde_json::Error> for ReshapeError {
    fn from(err: serde_json::Error) -> Self {
        ReshapeError::MalformedManifest(err.to_string())
    }
}

impl From<config::ConfigError> for ReshapeError {
    fn from(err: config::ConfigError) -> Self {
        ReshapeError::ConfigError(err.to_string())
    }
}
