use thiserror::Error;

/// Longest parser diagnostic carried by [`InterpretError::MalformedXml`], in characters.
pub const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InterpretError>;

/// Errors that abort loading or interpreting an invoice.
///
/// Every variant is terminal for the operation that produced it. Fields
/// that fail to resolve are not errors; they become [`Field::Missing`].
///
/// [`Field::Missing`]: crate::core::Field::Missing
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InterpretError {
    /// The file exceeds the loader's size limit. Raised before any read.
    #[error("file too large: {size} bytes (limit: {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// Reading the file failed.
    #[error("unable to read the file: {0}")]
    FileReadFailure(#[source] std::io::Error),

    /// Interpretation was requested before any non-empty text was loaded.
    #[error("no XML file loaded")]
    NoInputLoaded,

    /// The XML text is not well-formed.
    #[error("invalid XML: {0}")]
    MalformedXml(String),

    /// The embedded PDF payload is not valid base64.
    #[error("invalid base64 in embedded PDF: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// A path expression could not be constructed.
    #[error("invalid path expression `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The decoded payload is not a readable PDF.
    #[cfg(feature = "inspect")]
    #[error("invalid PDF: {0}")]
    InvalidPdf(String),
}

impl InterpretError {
    /// Build a [`InterpretError::MalformedXml`] from a parser diagnostic,
    /// keeping at most [`MAX_DIAGNOSTIC_CHARS`] characters.
    pub fn malformed(diagnostic: impl std::fmt::Display) -> Self {
        let text = diagnostic.to_string();
        let excerpt = match text.char_indices().nth(MAX_DIAGNOSTIC_CHARS) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text,
        };
        InterpretError::MalformedXml(excerpt)
    }

    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        InterpretError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
