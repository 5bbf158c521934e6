//! Error types
//!
//! Parsing either produces a fully consistent tree or fails. There is no
//! partial-result path.

use thiserror::Error;

/// Errors raised by parsing, view decoding and text-view construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Grammar violation in the input document.
    ///
    /// `position` is the byte offset the scanner stopped at, `preview` a short
    /// excerpt of the text around it.
    #[error("{message} at {position}: {preview}")]
    Structure {
        message: String,
        position: usize,
        preview: String,
    },

    /// Internal invariant violation in the entries buffer.
    ///
    /// Never produced from scanner output; surfacing one means a bug.
    #[error("inconsistent entry at {index}: {message}")]
    Consistency { message: String, index: usize },

    /// A text-view window falls outside its source, or splits a character.
    #[error("window {offset}+{len} out of bounds for text of length {available}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },
}

impl Error {
    pub(crate) fn structure(
        message: impl Into<String>,
        position: usize,
        preview: impl Into<String>,
    ) -> Self {
        Error::Structure {
            message: message.into(),
            position,
            preview: preview.into(),
        }
    }

    pub(crate) fn consistency(message: impl Into<String>, index: usize) -> Self {
        Error::Consistency {
            message: message.into(),
            index,
        }
    }

    /// Byte offset of a structure error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Structure { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, Error::Structure { .. })
    }

    pub fn is_consistency(&self) -> bool {
        matches!(self, Error::Consistency { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
