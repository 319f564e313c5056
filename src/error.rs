//! Error types for the splitter.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a split.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document has no `features` key.
    #[error("Invalid GeoJSON file: Missing 'features' key.")]
    MissingFeaturesKey,

    /// `features` is present but holds something other than an array.
    #[error("Invalid GeoJSON file: 'features' must be an array, found {0}")]
    InvalidFeatures(&'static str),

    /// Output document could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    /// True for the expected bad-input case that ends the run with a message
    /// instead of a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SplitError::MissingFeaturesKey)
    }
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;
