//! Error types for the resume_pdf crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Fatal failures of an export run.
///
/// Recoverable content problems (malformed front matter, unparsable dates, missing optional
/// fields) never surface here; they degrade to defaults inside the parsers.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A required content file or directory does not exist.
    #[error("required input is missing: {}", path.display())]
    MissingInput {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// No usable font family could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),

    /// The header photo could not be decoded.
    #[error("failed to load header image: {0}")]
    Image(#[source] genpdf::error::Error),

    /// The PDF layout or serialization step failed.
    #[error("failed to render PDF: {0}")]
    Render(#[source] genpdf::error::Error),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }
}
