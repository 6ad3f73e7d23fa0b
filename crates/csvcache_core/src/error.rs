//! Error types for cache operations.

use crate::header::HeaderMismatch;
use crate::quoting::QuoteError;
use std::io;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while loading, building or writing a cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The document header does not match the configured header.
    #[error("incompatible header: {0}")]
    IncompatibleHeader(#[from] HeaderMismatch),

    /// The document could not be parsed as CSV.
    #[error("malformed CSV{}: {source}", describe_line(.line))]
    MalformedCsv {
        /// Line on which parsing failed, when known.
        line: Option<u64>,
        /// What was wrong with the document.
        source: SyntaxError,
    },

    /// The byte source failed while the document was being read.
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// The byte sink rejected a row or failed to flush.
    #[error("write error: {0}")]
    Write(#[source] csv::Error),

    /// A record must contain at least its key field.
    #[error("record has no fields")]
    EmptyRecord,
}

impl CacheError {
    /// Classifies a reader error as either a source failure or a parse failure.
    pub(crate) fn from_read(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::MalformedCsv {
                line: err.position().map(csv::Position::line),
                source: SyntaxError::Parse(err),
            };
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => Self::Read(io_err),
            other => Self::Read(io::Error::new(io::ErrorKind::Other, format!("{other:?}"))),
        }
    }

    /// Returns true if this error was caused by a header mismatch.
    #[must_use]
    pub fn is_incompatible_header(&self) -> bool {
        matches!(self, Self::IncompatibleHeader(_))
    }
}

/// Why a document could not be parsed.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// Rejected by the CSV parser (row width, encoding).
    #[error(transparent)]
    Parse(csv::Error),

    /// Broken quoting.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

fn describe_line(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}
