//! Integration test helpers.
//!
//! Provides a harness that mirrors every cache mutation in a plain map so
//! the cache can be checked against it after loads and writes.

use crate::generators::CacheOperation;
use csvcache_core::{CacheConfig, Record, RecordCache};
use std::collections::HashMap;

/// A test harness that tracks the records a cache should hold.
pub struct CacheHarness {
    /// The cache under test.
    pub cache: RecordCache,
    /// Expected contents, keyed by record key.
    expected: HashMap<String, Record>,
}

impl CacheHarness {
    /// Creates a harness around an empty, default-configured cache.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a harness around an empty cache with `config`.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            cache: RecordCache::with_config(config),
            expected: HashMap::new(),
        }
    }

    /// Loads `doc` into the cache and resets the tracked contents to match.
    pub fn load(&mut self, doc: &str) {
        self.cache
            .load(doc.as_bytes())
            .expect("Failed to load document");
        self.expected = self
            .cache
            .iter()
            .map(|record| (record.key().to_string(), record.clone()))
            .collect();
    }

    /// Adds a record and tracks it.
    pub fn add(&mut self, record: Record) {
        self.expected
            .insert(record.key().to_string(), record.clone());
        self.cache.add_record(record);
    }

    /// Looks up `key` and checks the result against the tracked value.
    pub fn get_and_verify(&self, key: &str) -> Option<&Record> {
        let actual = self.cache.get_record(key);
        assert_eq!(
            actual,
            self.expected.get(key),
            "Record mismatch for key {key:?}"
        );
        actual
    }

    /// Applies a generated operation.
    pub fn apply(&mut self, op: CacheOperation) {
        match op {
            CacheOperation::Add(record) => self.add(record),
            CacheOperation::Get(key) => {
                self.get_and_verify(&key);
            }
        }
    }

    /// Verifies every tracked record is in the cache and nothing else is.
    pub fn verify_all(&self) {
        assert_eq!(self.cache.len(), self.expected.len(), "Record count mismatch");
        for (key, expected) in &self.expected {
            assert_eq!(
                self.cache.get_record(key),
                Some(expected),
                "Record mismatch for key {key:?}"
            );
        }
    }

    /// Writes the cache and loads the output into a fresh cache with the
    /// same configuration.
    pub fn round_trip(&self) -> RecordCache {
        round_trip(&self.cache)
    }

    /// Returns the count of tracked records.
    pub fn tracked_count(&self) -> usize {
        self.expected.len()
    }
}

impl Default for CacheHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `cache` to memory and loads the output into a fresh cache.
pub fn round_trip(cache: &RecordCache) -> RecordCache {
    let mut out = Vec::new();
    cache.write_cache(&mut out).expect("Failed to write cache");

    let mut copy = RecordCache::with_config(cache.config().clone());
    copy.load(out.as_slice()).expect("Failed to reload written cache");
    copy
}

/// Asserts that `copy` holds the same header and records as `original`.
pub fn assert_same_contents(original: &RecordCache, copy: &RecordCache) {
    assert_eq!(copy.header(), original.header(), "Header mismatch");
    assert_eq!(copy.len(), original.len(), "Record count mismatch");
    for record in original {
        assert_eq!(
            copy.get_record(record.key()),
            Some(record),
            "Record mismatch for key {:?}",
            record.key()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{init_test_logging, TempCsvFile, BASIC_CSV, BASIC_KEYS};
    use crate::generators::{document_strategy, operation_sequence_strategy, PropTestConfig};
    use csvcache_core::{CacheError, HeaderMismatch, WriteOrder, DEFAULT_HEADER};
    use proptest::prelude::*;

    fn record(fields: &[&str]) -> Record {
        Record::new(fields.iter().copied()).unwrap()
    }

    #[test]
    fn header_fields_from_file() {
        init_test_logging();
        let file = TempCsvFile::with_contents("basic.csv", BASIC_CSV);
        let mut cache = RecordCache::new();
        file.load_into(&mut cache);

        assert_eq!(cache.header(), DEFAULT_HEADER);
        assert_eq!(cache.header()[0], "unique_id");
        assert_eq!(cache.header()[4], "height");
    }

    #[test]
    fn file_write_then_reload() {
        init_test_logging();
        let source = TempCsvFile::with_contents("basic.csv", BASIC_CSV);
        let mut first = RecordCache::new();
        source.load_into(&mut first);

        assert_eq!(first.get_record("9ec2c7f5d0c4"), None);
        assert!(!first.is_modified());

        first.add_record(record(&["9ec2c7f5d0c4", "whoop", "97", "100", "1000"]));
        assert!(first.is_modified());

        let target = TempCsvFile::new("tmp-basic.csv");
        target.write_from(&first);

        let mut second = RecordCache::new();
        target.load_into(&mut second);

        assert_eq!(second.header(), first.header());
        for key in BASIC_KEYS.iter().copied().chain(["9ec2c7f5d0c4"]) {
            assert_eq!(second.get_record(key), first.get_record(key), "key {key}");
        }
        assert!(!second.is_modified());
    }

    #[test]
    fn overwrite_in_file_back_cache() {
        let file = TempCsvFile::with_contents("basic.csv", BASIC_CSV);
        let mut cache = RecordCache::new();
        file.load_into(&mut cache);

        cache.add_record(record(&["ghx3fpf7", "image_set", "5", "136", "108"]));
        file.write_from(&cache);

        let mut reloaded = RecordCache::new();
        file.load_into(&mut reloaded);
        assert_eq!(reloaded.get_record("ghx3fpf7").unwrap().get(2), Some("5"));
        assert_eq!(reloaded.len(), 4);
    }

    #[test]
    fn incompatible_file_is_rejected() {
        let file = TempCsvFile::with_contents(
            "other.csv",
            "unique_id,do_type,count,width,depth\nk,a,1,2,3\n",
        );
        let mut cache = RecordCache::new();
        let err = cache.load(file.reader()).unwrap_err();

        match err {
            CacheError::IncompatibleHeader(HeaderMismatch::Field {
                index,
                expected,
                actual,
            }) => {
                assert_eq!(index, 4);
                assert_eq!(expected, "height");
                assert_eq!(actual, "depth");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn sorted_file_output_is_stable() {
        let config = CacheConfig::new().write_order(WriteOrder::SortedByKey);
        let file = TempCsvFile::with_contents("basic.csv", BASIC_CSV);
        let mut cache = RecordCache::with_config(config);
        file.load_into(&mut cache);

        let first = TempCsvFile::new("a.csv");
        let second = TempCsvFile::new("b.csv");
        first.write_from(&cache);
        second.write_from(&cache);
        assert_eq!(first.contents(), second.contents());
    }

    #[test]
    fn harness_tracks_loads_and_adds() {
        let mut harness = CacheHarness::new();
        harness.load(BASIC_CSV);
        assert_eq!(harness.tracked_count(), 4);

        harness.add(record(&["new", "x", "1", "2", "3"]));
        harness.add(record(&["ghx3fpf7", "y", "1", "2", "3"]));
        harness.verify_all();
        assert!(harness.get_and_verify("missing").is_none());

        let copy = harness.round_trip();
        assert_same_contents(&harness.cache, &copy);
    }

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn written_documents_reload_identically((header, records) in document_strategy(6, 40)) {
            let mut cache = RecordCache::with_config(CacheConfig::new().expected_header(header));
            cache.extend(records);

            let copy = round_trip(&cache);
            assert_same_contents(&cache, &copy);
            prop_assert!(!copy.is_modified());
        }
    }

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn operations_match_model(ops in operation_sequence_strategy(5, 1, 60)) {
            let mut harness = CacheHarness::new();
            harness.load(BASIC_CSV);

            let mut added = false;
            for op in ops {
                added |= matches!(op, CacheOperation::Add(_));
                harness.apply(op);
            }

            harness.verify_all();
            prop_assert_eq!(harness.cache.is_modified(), added);
            assert_same_contents(&harness.cache, &harness.round_trip());
        }

        #[test]
        fn last_write_wins(first in crate::generators::record_strategy(5), second in crate::generators::record_strategy(5)) {
            let mut cache = RecordCache::new();
            let mut second = second.into_fields();
            second[0] = first.key().to_string();
            let second = Record::try_from(second).unwrap();

            cache.add_record(first);
            cache.add_record(second.clone());
            prop_assert_eq!(cache.get_record(second.key()), Some(&second));
            prop_assert_eq!(cache.len(), 1);
        }
    }
}
