//! Error types for collada-xml
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using collada-xml Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for collada-xml operations
#[derive(Error, Debug)]
pub enum Error {
    /// Unrecognized schema version string
    #[error("invalid COLLADA version '{version}' (expected one of: {expected})")]
    InvalidVersion {
        /// The rejected version string
        version: String,
        /// Comma separated list of known versions
        expected: String,
    },

    /// Builder child that is neither text, an attribute mapping nor an element
    #[error("unsupported child type: {0}")]
    UnsupportedChildType(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML writer error
    #[error("XML error: {0}")]
    Xml(String),
}

impl Error {
    /// Create an [`Error::InvalidVersion`] listing the accepted versions
    pub fn invalid_version<'a>(
        version: impl Into<String>,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Error::InvalidVersion {
            version: version.into(),
            expected: expected.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}
