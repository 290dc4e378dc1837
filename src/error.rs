//! Error types for the docsift library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and ranking.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reported by the PDF layout provider.
    #[error("PDF layout error: {0}")]
    Pdf(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The relevance job specification is malformed.
    #[error("Invalid job spec: {0}")]
    InvalidJobSpec(String),

    /// A named input document does not exist.
    ///
    /// Batch processing downgrades this to a warning and skips the file.
    #[error("Missing input file: {0}")]
    MissingInput(PathBuf),

    /// The relevance pipeline found no non-empty chunks in any input document.
    #[error("No text could be extracted from the input documents")]
    NoExtractableChunks,

    /// The semantic encoder failed to produce an embedding.
    #[error("Encoding error: {0}")]
    Encode(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoExtractableChunks;
        assert_eq!(
            err.to_string(),
            "No text could be extracted from the input documents"
        );

        let err = Error::MissingInput(PathBuf::from("a/b.pdf"));
        assert_eq!(err.to_string(), "Missing input file: a/b.pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
