//! Property-based test generators using proptest.
//!
//! Provides strategies for generating headers, records and whole
//! documents that respect the cache's invariants.

use csvcache_core::Record;
use proptest::prelude::*;

/// Strategy for generating record keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,12}").expect("Invalid regex")
}

/// Strategy for generating field values.
///
/// Includes the characters that force quoting on output: separators,
/// quotes and line breaks.
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-zA-Z0-9_]{0,10}").expect("Invalid regex"),
        1 => prop::string::string_regex("[a-z ,\"\r\n]{0,8}").expect("Invalid regex"),
        1 => (0u32..100_000).prop_map(|n| n.to_string()),
    ]
}

/// Strategy for generating header field names.
pub fn header_strategy(width: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex("[a-z][a-z_]{0,9}").expect("Invalid regex"),
        width,
    )
}

/// Strategy for generating records with exactly `width` fields.
pub fn record_strategy(width: usize) -> impl Strategy<Value = Record> {
    let rest = width.saturating_sub(1);
    (key_strategy(), prop::collection::vec(field_strategy(), rest)).prop_map(|(key, rest)| {
        let mut fields = Vec::with_capacity(rest.len() + 1);
        fields.push(key);
        fields.extend(rest);
        Record::try_from(fields).expect("record has a key")
    })
}

/// Strategy for generating a header together with matching records.
pub fn document_strategy(
    max_width: usize,
    max_records: usize,
) -> impl Strategy<Value = (Vec<String>, Vec<Record>)> {
    (1..=max_width.max(1)).prop_flat_map(move |width| {
        (
            header_strategy(width),
            prop::collection::vec(record_strategy(width), 0..max_records),
        )
    })
}

/// A single cache operation.
#[derive(Debug, Clone)]
pub enum CacheOperation {
    /// Add a record
    Add(Record),
    /// Look up a key
    Get(String),
}

/// Strategy for generating cache operations on records of `width` fields.
pub fn cache_operation_strategy(width: usize) -> impl Strategy<Value = CacheOperation> {
    prop_oneof![
        3 => record_strategy(width).prop_map(CacheOperation::Add),
        2 => key_strategy().prop_map(CacheOperation::Get),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    width: usize,
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<CacheOperation>> {
    prop::collection::vec(cache_operation_strategy(width), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
