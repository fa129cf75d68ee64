//! Error types for markup interchange.

use thiserror::Error;

use crate::error::BuildError;

/// Errors that can occur while reading or writing NCL markup.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Tag or attribute name that is not UTF-8.
    #[error("invalid UTF-8 in markup: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The event stream was rejected by the builder.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl InterchangeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}
