//! Error types and path context for collage operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all collage operations
#[derive(Debug)]
pub enum CollageError {
    /// A caller-supplied value was rejected before any work was done
    ///
    /// Covers malformed size strings, unknown modes, upscale requests
    /// and geometries that leave no room for a single cell.
    InvalidArgument {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or write an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
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

    /// A pixel buffer could not be allocated
    ResourceExhaustion {
        /// Which buffer was being allocated
        what: &'static str,
        /// Requested size in bytes (saturated on overflow)
        bytes: usize,
    },

    /// No candidate photo survived loading and filtering
    EmptyPool {
        /// Where the candidates were taken from
        source: String,
        /// Number of files that were examined
        examined: usize,
    },
}

impl fmt::Display for CollageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid argument '{parameter}' = '{value}': {reason}")
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
            Self::ResourceExhaustion { what, bytes } => {
                write!(f, "Unable to allocate {bytes} bytes for {what}")
            }
            Self::EmptyPool { source, examined } => {
                write!(
                    f,
                    "No usable candidate photos in '{source}' ({examined} files examined)"
                )
            }
        }
    }
}

impl std::error::Error for CollageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for collage results
pub type Result<T> = std::result::Result<T, CollageError>;

/// Attaches the offending path to I/O and decode failures
pub trait WithPath<T> {
    /// Replace the placeholder path of a load or file system error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<CollageError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                CollageError::ImageLoad { path: slot, .. }
                | CollageError::ImageExport { path: slot, .. }
                | CollageError::FileSystem { path: slot, .. } => {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for CollageError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for CollageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid argument error
pub fn invalid_argument(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollageError {
    CollageError::InvalidArgument {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a resource exhaustion error for a buffer of `bytes` bytes
pub const fn exhausted(what: &'static str, bytes: usize) -> CollageError {
    CollageError::ResourceExhaustion { what, bytes }
}
