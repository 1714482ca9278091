//! Error types for grid sampling, analysis and the surrounding file handling

use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all depixelator operations
#[derive(Debug)]
pub enum DepixelError {
    /// An argument to a core operation is out of its valid range
    ///
    /// Raised for a zero cell size or a bitmap with no area.
    InvalidArgument {
        /// Name of the invalid argument
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A grid's cells do not cover its declared lattice exactly once
    CorruptGrid {
        /// Cell count implied by the grid metadata
        expected: u64,
        /// Cell count actually present
        found: u64,
        /// Description of the inconsistency
        reason: String,
    },

    /// Failed to decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying codec error
        source: image::ImageError,
    },

    /// Failed to encode or write a reconstructed image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying codec error
        source: image::ImageError,
    },

    /// No image encoder matches the requested output
    UnsupportedFormat {
        /// Output path or extension that was requested
        path: PathBuf,
    },

    /// Failed to read or write a JSON document
    Serialization {
        /// Path of the document
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for DepixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid argument '{parameter}' = '{value}': {reason}")
            }
            Self::CorruptGrid {
                expected,
                found,
                reason,
            } => {
                write!(
                    f,
                    "Corrupt grid: expected {expected} cells, found {found} ({reason})"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::UnsupportedFormat { path } => {
                write!(f, "No image encoder for '{}'", path.display())
            }
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON document '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DepixelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for depixelator results
pub type Result<T> = std::result::Result<T, DepixelError>;

/// Attaches the real file path to errors converted without one
pub trait WithPath<T> {
    /// Replace an unknown path on the error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<DepixelError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors raised through the blanket conversions carry a placeholder
            match &mut error {
                DepixelError::ImageLoad { path: slot, .. }
                | DepixelError::ImageExport { path: slot, .. }
                | DepixelError::UnsupportedFormat { path: slot }
                | DepixelError::Serialization { path: slot, .. }
                | DepixelError::FileSystem { path: slot, .. } => {
                    if slot.as_os_str() == UNKNOWN_PATH {
                        *slot = path.to_path_buf();
                    }
                }
                DepixelError::InvalidArgument { .. } | DepixelError::CorruptGrid { .. } => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for DepixelError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DepixelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for DepixelError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid argument error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DepixelError {
    DepixelError::InvalidArgument {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid argument error for a rejected CLI target path
pub fn invalid_target(path: &Path, reason: &str) -> DepixelError {
    DepixelError::InvalidArgument {
        parameter: "target",
        value: path.display().to_string(),
        reason: reason.to_string(),
    }
}
