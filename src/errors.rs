//! Typed error definitions for audio_rename.
//! Provides a small set of well-known failure modes for better logs, exit codes and tests.

use std::path::PathBuf;
use thiserror::Error;

use crate::template::FormatError;

#[derive(Debug, Error)]
pub enum AudioRenameError {
    #[error("Invalid naming format: {0}")]
    Format(#[from] FormatError),

    #[error("Cannot read metadata from {path}: {reason}")]
    MetadataRead { path: PathBuf, reason: String },

    #[error("Destination already exists: {0}")]
    Collision(PathBuf),

    #[error("No free disambiguated name for {0}")]
    DisambiguationExhausted(PathBuf),

    #[error("{op} '{path}': {message}")]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("Working directory is missing or not a directory: {0}")]
    DirectoryInvalid(PathBuf),

    #[error("Another audio_rename run holds the lock on {0}")]
    Locked(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl AudioRenameError {
    /// Process exit code associated with this failure.
    pub fn code(&self) -> i32 {
        match self {
            AudioRenameError::Format(_) => 2,
            AudioRenameError::DirectoryInvalid(_) => 3,
            AudioRenameError::Locked(_) => 4,
            AudioRenameError::Interrupted => 130,
            _ => 1,
        }
    }

    /// Short stable tag used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AudioRenameError::Format(_) => "format",
            AudioRenameError::MetadataRead { .. } => "metadata_read",
            AudioRenameError::Collision(_) => "collision",
            AudioRenameError::DisambiguationExhausted(_) => "disambiguation_exhausted",
            AudioRenameError::Filesystem { .. } => "filesystem",
            AudioRenameError::DirectoryInvalid(_) => "directory_invalid",
            AudioRenameError::Locked(_) => "locked",
            AudioRenameError::Interrupted => "interrupted",
        }
    }
}
