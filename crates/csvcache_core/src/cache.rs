//! The CSV-backed record cache.

use crate::config::{CacheConfig, HeaderPolicy, WriteOrder};
use crate::error::{CacheError, CacheResult};
use crate::header::validate_header;
use crate::quoting::QuoteValidator;
use crate::record::Record;
use std::collections::HashMap;
use std::io::{Read, Write};
use tracing::{debug, trace, warn};

/// Summary of a successful [`RecordCache::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    /// Number of distinct keys now in the cache.
    pub records: usize,
    /// Number of data rows that replaced an earlier row with the same key.
    pub duplicate_keys: usize,
}

/// An in-memory cache of records keyed by their first field.
///
/// The cache is filled from a CSV document whose first row is the header,
/// queried and extended in memory, and written back out as CSV. It tracks
/// whether any record has been added since the last load.
///
/// # Thread Safety
///
/// The cache holds no locks. Callers sharing one instance between threads
/// must serialize access themselves.
///
/// # Example
///
/// ```rust
/// use csvcache_core::{Record, RecordCache};
///
/// let doc = "unique_id,do_type,count,width,height\nghx3fpf7,image_set,2,136,108\n";
///
/// let mut cache = RecordCache::new();
/// cache.load(doc.as_bytes()).unwrap();
/// assert_eq!(cache.get_record("ghx3fpf7").unwrap().get(1), Some("image_set"));
/// assert!(!cache.is_modified());
///
/// cache.add_record(Record::new(["9ec2c7f5d0c4", "whoop", "97", "100", "1000"]).unwrap());
/// assert!(cache.is_modified());
///
/// let mut out = Vec::new();
/// cache.write_cache(&mut out).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RecordCache {
    config: CacheConfig,
    header: Vec<String>,
    records: HashMap<String, Record>,
    modified: bool,
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache {
    /// Creates an empty cache with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates an empty cache with the given configuration.
    ///
    /// The header starts out as the configured expected header.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            header: config.expected_header.clone(),
            config,
            records: HashMap::new(),
            modified: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the current header row.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Replaces the cache contents with the document read from `reader`.
    ///
    /// The first row is the header and is never stored as a record. Every
    /// following row is stored under its first field; a later row with the
    /// same key replaces an earlier one.
    ///
    /// Loading is all-or-nothing: rows are collected into a fresh map and
    /// only swapped in once the whole document has parsed and the header
    /// has been accepted. On success the modified flag is cleared. A
    /// document with no rows at all empties the cache and keeps the
    /// current header.
    ///
    /// # Errors
    ///
    /// - [`CacheError::IncompatibleHeader`] if header validation is enabled
    ///   and the document header differs from the expected header.
    /// - [`CacheError::MalformedCsv`] if the document is not valid CSV, or a
    ///   row's width differs from the header's in strict mode. Bare quotes,
    ///   text after a closing quote and unclosed quoted fields are rejected
    ///   unless `lenient_quotes` is set.
    /// - [`CacheError::Read`] if the reader fails.
    ///
    /// On error the cache is left exactly as it was.
    pub fn load<R: Read>(&mut self, reader: R) -> CacheResult<LoadStats> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(self.config.flexible)
            .from_reader(QuoteValidator::new(reader, !self.config.lenient_quotes));

        let mut row = csv::StringRecord::new();

        let header = if next_row(&mut csv_reader, &mut row)? {
            let header: Vec<String> = row.iter().map(str::to_string).collect();
            self.check_header(&header)?;
            header
        } else {
            self.header.clone()
        };

        let mut records = HashMap::new();
        let mut duplicate_keys = 0;
        while next_row(&mut csv_reader, &mut row)? {
            let record = Record::try_from(&row)?;
            if records.insert(record.key().to_string(), record).is_some() {
                duplicate_keys += 1;
            }
        }

        if duplicate_keys > 0 {
            warn!(duplicate_keys, "document contains repeated keys; later rows win");
        }

        let stats = LoadStats {
            records: records.len(),
            duplicate_keys,
        };

        self.header = header;
        self.records = records;
        self.modified = false;

        debug!(records = stats.records, "loaded record cache");
        Ok(stats)
    }

    fn check_header(&self, header: &[String]) -> CacheResult<()> {
        match self.config.header_policy {
            HeaderPolicy::Validate => {
                validate_header(&self.config.expected_header, header)?;
            }
            HeaderPolicy::AcceptAny => {
                if validate_header(&self.config.expected_header, header).is_err() {
                    warn!(?header, "accepting header that differs from the expected header");
                }
            }
        }
        Ok(())
    }

    /// Returns the record stored under `key`.
    #[must_use]
    pub fn get_record(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    /// Inserts `record` under its key, replacing any existing record.
    ///
    /// Always marks the cache as modified, even when the stored record is
    /// identical. The record's width is not checked against the header.
    ///
    /// Returns the record that was replaced, if any.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        trace!(key = record.key(), "adding record");
        self.modified = true;
        self.records.insert(record.key().to_string(), record)
    }

    /// Returns true if a record has been added since construction or the
    /// last successful load.
    ///
    /// Writing the cache does not clear this flag.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns true if a record is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Returns the number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the cached keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Iterates over the cached records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Writes the header followed by every cached record to `writer`.
    ///
    /// Fields containing a comma, quote or line break are quoted and
    /// embedded quotes are doubled. Row order follows the configured
    /// [`WriteOrder`]. Output is flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Write`] if the writer rejects a row or the
    /// final flush fails. The cache itself is never changed.
    pub fn write_cache<W: Write>(&self, writer: W) -> CacheResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        csv_writer
            .write_record(&self.header)
            .map_err(CacheError::Write)?;

        let mut rows: Vec<&Record> = self.records.values().collect();
        if self.config.write_order == WriteOrder::SortedByKey {
            rows.sort_unstable_by(|a, b| a.key().cmp(b.key()));
        }

        for record in rows {
            csv_writer
                .write_record(record.fields())
                .map_err(CacheError::Write)?;
        }

        csv_writer
            .flush()
            .map_err(|e| CacheError::Write(e.into()))?;

        debug!(records = self.records.len(), "wrote record cache");
        Ok(())
    }
}

/// Reads the next row, surfacing any quoting violation first.
fn next_row<R: Read>(
    reader: &mut csv::Reader<QuoteValidator<R>>,
    row: &mut csv::StringRecord,
) -> CacheResult<bool> {
    let result = reader.read_record(row);
    if let Some(violation) = reader.get_ref().violation() {
        return Err(violation.into_error());
    }
    result.map_err(CacheError::from_read)
}

impl<'a> IntoIterator for &'a RecordCache {
    type Item = &'a Record;
    type IntoIter = std::collections::hash_map::Values<'a, String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

impl Extend<Record> for RecordCache {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        for record in iter {
            self.add_record(record);
        }
    }
}
