//! Error types for cardfile.
//!
//! This module defines all error types used throughout the cardfile crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The main error type for cardfile operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === OCR Errors ===
    /// The image to scan does not exist.
    #[error("image not found: {path}")]
    ImageNotFound {
        /// Path that was given.
        path: PathBuf,
    },

    /// The file exists but is not a recognised raster image.
    #[error("unsupported or malformed image: {path}")]
    UnsupportedImage {
        /// Path that was given.
        path: PathBuf,
    },

    /// The OCR program could not be started.
    #[error("failed to run OCR program '{program}': {source}")]
    OcrUnavailable {
        /// Program that was invoked.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The OCR program ran but reported failure.
    #[error("OCR failed ({status}): {stderr}")]
    OcrFailed {
        /// Exit status of the OCR program.
        status: ExitStatus,
        /// What the program wrote to stderr.
        stderr: String,
    },

    // === I/O Errors ===
    /// Failed to read a file of already-recognized card text.
    #[error("failed to read card text from {path}: {source}")]
    ReadText {
        /// Path that was given.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for cardfile operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from the OCR step (including image checks).
    #[must_use]
    pub fn is_ocr_error(&self) -> bool {
        matches!(
            self,
            Self::ImageNotFound { .. }
                | Self::UnsupportedImage { .. }
                | Self::OcrUnavailable { .. }
                | Self::OcrFailed { .. }
        )
    }
}
