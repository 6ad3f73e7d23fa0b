//! Cached record type.

use crate::error::{CacheError, CacheResult};
use std::fmt;

/// An ordered sequence of text fields. Field 0 is the record's key.
///
/// A record always holds at least one field. Numeric-looking columns are
/// kept as text and written back exactly as they were read.
///
/// # Example
///
/// ```rust
/// use csvcache_core::Record;
///
/// let record = Record::new(["ghx3fpf7", "image_set", "2", "136", "108"]).unwrap();
/// assert_eq!(record.key(), "ghx3fpf7");
/// assert_eq!(record.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record(Vec<String>);

impl Record {
    /// Creates a record from its fields.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::EmptyRecord`] if `fields` is empty.
    pub fn new<I, S>(fields: I) -> CacheResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self::try_from(fields)
    }

    /// Returns the key (field 0).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.0[0]
    }

    /// Returns all fields, key included.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Returns the field at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a record holds at least its key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Consumes the record, returning its fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}

impl TryFrom<Vec<String>> for Record {
    type Error = CacheError;

    fn try_from(fields: Vec<String>) -> CacheResult<Self> {
        if fields.is_empty() {
            return Err(CacheError::EmptyRecord);
        }
        Ok(Self(fields))
    }
}

impl TryFrom<&csv::StringRecord> for Record {
    type Error = CacheError;

    fn try_from(row: &csv::StringRecord) -> CacheResult<Self> {
        Self::new(row.iter())
    }
}

impl From<Record> for Vec<String> {
    fn from(record: Record) -> Self {
        record.0
    }
}

impl AsRef<[String]> for Record {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl PartialEq<[&str]> for Record {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for Record {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}
