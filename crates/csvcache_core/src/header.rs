//! Header rows and header validation.

use thiserror::Error;

/// Column layout used by the reference fixtures.
pub const DEFAULT_HEADER: [&str; 5] = ["unique_id", "do_type", "count", "width", "height"];

/// Earlier three-column layout, still accepted via [`crate::CacheConfig::legacy`].
pub const LEGACY_HEADER: [&str; 3] = ["unique_id", "do_type", "count"];

/// Describes how a document header differs from the expected header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderMismatch {
    /// The document header has a different number of fields.
    #[error("header field count mismatch: expected {expected} fields, got {actual}")]
    FieldCount {
        /// Number of fields in the expected header.
        expected: usize,
        /// Number of fields in the document header.
        actual: usize,
    },

    /// A header field differs from the expected name.
    #[error("header field mismatch at index {index}: expected '{expected}', got '{actual}'")]
    Field {
        /// Zero-based position of the first differing field.
        index: usize,
        /// The expected field name.
        expected: String,
        /// The field name found in the document.
        actual: String,
    },
}

/// Returns the default header as owned strings.
#[must_use]
pub fn default_header() -> Vec<String> {
    to_owned_header(&DEFAULT_HEADER)
}

pub(crate) fn to_owned_header(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

/// Checks a document header against the expected header.
///
/// The field count is checked first; after that the first differing
/// position is reported.
///
/// # Errors
///
/// Returns a [`HeaderMismatch`] describing the first difference found.
pub fn validate_header<E, A>(expected: &[E], actual: &[A]) -> Result<(), HeaderMismatch>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    if expected.len() != actual.len() {
        return Err(HeaderMismatch::FieldCount {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    for (index, (want, got)) in expected.iter().zip(actual).enumerate() {
        if want.as_ref() != got.as_ref() {
            return Err(HeaderMismatch::Field {
                index,
                expected: want.as_ref().to_string(),
                actual: got.as_ref().to_string(),
            });
        }
    }

    Ok(())
}
