//! Error types for the conversion pipeline.
//!
//! Every failure is terminal for the current run. Callers discriminate
//! through [`ConvertError::kind`] rather than by matching message text.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting, injecting or writing chapters.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A time string does not follow the `NUM[/DEN]s` grammar.
    #[error("Invalid time value '{value}': expected NUM[/DEN]s")]
    Format { value: String },

    /// A required structural node is absent.
    #[error("Missing required element <{0}>")]
    MissingElement(String),

    /// A named event or project cannot be located.
    #[error("Cannot find {kind} '{name}'")]
    NotFound { kind: String, name: String },

    /// The document shape is valid XML but not something we can convert.
    #[error("Unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// Only the 30000 time base is supported.
    #[error("Unsupported time base {0} (only 30000 is supported)")]
    UnsupportedTimeBase(u64),

    /// The document is malformed or has the wrong root element.
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// An argument is outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serializing the document to text failed.
    #[error("Failed to render document: {0}")]
    Render(String),

    /// File I/O error.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    MissingElement,
    NotFound,
    UnsupportedStructure,
    UnsupportedTimeBase,
    Parse,
    InvalidArgument,
    Render,
    Io,
}

impl ConvertError {
    /// Create a format error for a time string.
    pub fn format(value: impl Into<String>) -> Self {
        Self::Format {
            value: value.into(),
        }
    }

    /// Create a missing element error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingElement(name.into())
    }

    /// Create a not-found error, e.g. `not_found("event", "Wedding")`.
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unsupported structure error.
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedStructure(detail.into())
    }

    /// Create a parse error.
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse(detail.into())
    }

    /// Create an I/O error with the path involved.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::MissingElement(_) => ErrorKind::MissingElement,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedStructure(_) => ErrorKind::UnsupportedStructure,
            Self::UnsupportedTimeBase(_) => ErrorKind::UnsupportedTimeBase,
            Self::Parse(_) => ErrorKind::Parse,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Render(_) => ErrorKind::Render,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
