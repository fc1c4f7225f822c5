//! Error types for spacehogs
//!
//! This module defines the error hierarchy for:
//! - Size expression parsing
//! - Configuration and root path validation
//! - Per-node I/O failures during the scan
//!
//! Only configuration errors abort a run. Scan errors are reported and the
//! affected node contributes zero bytes.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for the spacehogs library
#[derive(Error, Debug)]
pub enum SpacehogsError {
    /// Configuration errors, including an unparsable minimum size
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from parsing a size expression such as `100M` or `1.5G`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// Input does not look like `<number>[unit]`
    #[error("invalid size format: '{input}'")]
    InvalidFormat { input: String },

    /// Numeric part is not a valid decimal number
    #[error("invalid size number: '{number}'")]
    InvalidNumber { number: String },

    /// Byte count does not fit in 64 bits
    #[error("size '{input}' is too large")]
    OutOfRange { input: String },
}

/// Configuration and pre-scan validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Minimum size argument could not be parsed
    #[error("invalid minimum size: {0}")]
    InvalidSize(SizeError),

    /// Root path cannot be accessed
    #[error("error accessing '{}': {reason}", path.display())]
    PathInaccessible { path: PathBuf, reason: io::Error },

    /// Root path exists but is not a directory
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

// Not #[from]: the size error is part of the message, not a separate cause
impl From<SizeError> for ConfigError {
    fn from(err: SizeError) -> Self {
        ConfigError::InvalidSize(err)
    }
}

/// Non-fatal failures on a single node during the scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// Directory could not be listed
    #[error("Error reading directory {}: {source}", path.display())]
    ReadDirFailed { path: PathBuf, source: io::Error },

    /// An entry inside a directory listing could not be read
    #[error("Error reading entry in {}: {source}", path.display())]
    ReadEntryFailed { path: PathBuf, source: io::Error },

    /// File metadata could not be obtained
    #[error("Error getting info for {}: {source}", path.display())]
    StatFailed { path: PathBuf, source: io::Error },
}

impl ScanError {
    /// Path of the node that failed
    pub fn path(&self) -> &Path {
        match self {
            ScanError::ReadDirFailed { path, .. } => path,
            ScanError::ReadEntryFailed { path, .. } => path,
            ScanError::StatFailed { path, .. } => path,
        }
    }

    /// Check if the failure was a permission problem
    pub fn is_permission_denied(&self) -> bool {
        let source = match self {
            ScanError::ReadDirFailed { source, .. } => source,
            ScanError::ReadEntryFailed { source, .. } => source,
            ScanError::StatFailed { source, .. } => source,
        };
        source.kind() == io::ErrorKind::PermissionDenied
    }
}

/// Result type alias for SpacehogsError
pub type Result<T> = std::result::Result<T, SpacehogsError>;
