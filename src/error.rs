//! Error types for black-background removal operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for black-background removal operations
pub type Result<T> = std::result::Result<T, UnblackError>;

/// Error types for black-background removal operations
#[derive(Error, Debug)]
pub enum UnblackError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image format or codec errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The batch input root does not exist; fatal to the whole run
    #[error("Input directory does not exist: {}", .0.display())]
    InvalidInputRoot(PathBuf),

    /// Input file could not be parsed as an image; per-task failure
    #[error("Decode error: {0}")]
    Decode(String),

    /// Unexpected buffer shape reaching the transform engine; per-task failure
    #[error("Transform error: {0}")]
    Transform(String),

    /// Output path could not be created or written; per-task failure
    #[error("Write error: {0}")]
    Write(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UnblackError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new invalid input root error
    pub fn invalid_input_root<P: AsRef<Path>>(path: P) -> Self {
        Self::InvalidInputRoot(path.as_ref().to_path_buf())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {operation} '{path_display}': {error}"),
        ))
    }

    /// Create decode error with path context
    pub fn decode_error<P: AsRef<Path>>(path: P, error: &image::ImageError) -> Self {
        Self::Decode(format!(
            "Failed to decode image '{}': {error}",
            path.as_ref().display()
        ))
    }

    /// Create write error with path context
    pub fn write_error<P: AsRef<Path>>(path: P, error: &image::ImageError) -> Self {
        Self::Write(format!(
            "Failed to write image '{}': {error}",
            path.as_ref().display()
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
    ) -> Self {
        Self::InvalidConfig(format!(
            "Invalid {parameter}: {value} (valid range: {valid_range})"
        ))
    }
}
