//! Shared CSV test vectors.
//!
//! Each vector is a document plus the outcome a conforming cache must
//! produce. Vectors serialize to JSON so other implementations of the
//! same file format can be checked against them.

use csvcache_core::{CacheConfig, CacheError, HeaderMismatch, HeaderPolicy, RecordCache};
use serde::{Deserialize, Serialize};

/// Expected outcome of loading a vector's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expected {
    /// The load succeeds with these rows (header first, then records).
    Loaded {
        /// The resulting header.
        header: Vec<String>,
        /// The resulting records, in any order.
        records: Vec<Vec<String>>,
    },
    /// The header field count differs.
    FieldCountMismatch {
        /// Expected field count.
        expected: usize,
        /// Field count in the document.
        actual: usize,
    },
    /// A header field differs.
    FieldMismatch {
        /// Index of the first differing field.
        index: usize,
        /// Expected name.
        expected: String,
        /// Name in the document.
        actual: String,
    },
    /// The document is not valid CSV for the configuration.
    Malformed,
}

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Expected header configured on the cache.
    pub expected_header: Vec<String>,
    /// Whether header validation is enabled.
    pub validate_header: bool,
    /// Whether ragged rows are accepted.
    #[serde(default)]
    pub flexible: bool,
    /// Whether broken quoting is tolerated.
    #[serde(default)]
    pub lenient_quotes: bool,
    /// The CSV document.
    pub input: String,
    /// Expected outcome.
    pub expected: Expected,
}

impl CsvVector {
    /// Builds the cache configuration this vector runs under.
    pub fn config(&self) -> CacheConfig {
        let policy = if self.validate_header {
            HeaderPolicy::Validate
        } else {
            HeaderPolicy::AcceptAny
        };
        CacheConfig::new()
            .expected_header(self.expected_header.iter().cloned())
            .header_policy(policy)
            .flexible(self.flexible)
            .lenient_quotes(self.lenient_quotes)
    }

    /// Loads the input and compares the outcome with [`Self::expected`].
    ///
    /// Returns a description of the difference on failure.
    pub fn run(&self) -> Result<(), String> {
        let mut cache = RecordCache::with_config(self.config());
        let result = cache.load(self.input.as_bytes());

        match (&self.expected, result) {
            (Expected::Loaded { header, records }, Ok(_)) => {
                if cache.header() != header.as_slice() {
                    return Err(format!("header {:?} != {:?}", cache.header(), header));
                }
                if cache.len() != records.len() {
                    return Err(format!("{} records != {}", cache.len(), records.len()));
                }
                for fields in records {
                    let key = fields.first().ok_or("expected record has no key")?;
                    let actual = cache.get_record(key).map(|r| r.fields());
                    if actual != Some(fields.as_slice()) {
                        return Err(format!("record {key:?}: {actual:?} != {fields:?}"));
                    }
                }
                Ok(())
            }
            (
                Expected::FieldCountMismatch { expected, actual },
                Err(CacheError::IncompatibleHeader(HeaderMismatch::FieldCount {
                    expected: e,
                    actual: a,
                })),
            ) if *expected == e && *actual == a => Ok(()),
            (
                Expected::FieldMismatch {
                    index,
                    expected,
                    actual,
                },
                Err(CacheError::IncompatibleHeader(HeaderMismatch::Field {
                    index: i,
                    expected: e,
                    actual: a,
                })),
            ) if *index == i && *expected == e && *actual == a => Ok(()),
            (Expected::Malformed, Err(CacheError::MalformedCsv { .. })) => Ok(()),
            (expected, Ok(_)) => Err(format!("expected {expected:?}, load succeeded")),
            (expected, Err(err)) => Err(format!("expected {expected:?}, got error: {err}")),
        }
    }
}

fn strings(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

const FIVE: [&str; 5] = ["unique_id", "do_type", "count", "width", "height"];

/// Load behaviour vectors.
pub fn load_vectors() -> Vec<CsvVector> {
    vec![
        CsvVector {
            id: "load_basic".into(),
            description: "Matching header and one data row".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nghx3fpf7,image_set,2,136,108\n".into(),
            expected: Expected::Loaded {
                header: strings(&FIVE),
                records: vec![strings(&["ghx3fpf7", "image_set", "2", "136", "108"])],
            },
        },
        CsvVector {
            id: "load_duplicate_keys".into(),
            description: "Later rows replace earlier rows with the same key".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nk,a,1,1,1\nk,b,2,2,2\n".into(),
            expected: Expected::Loaded {
                header: strings(&FIVE),
                records: vec![strings(&["k", "b", "2", "2", "2"])],
            },
        },
        CsvVector {
            id: "load_quoted_fields".into(),
            description: "Quoted separators, quotes and line breaks".into(),
            expected_header: strings(&["unique_id", "do_type", "count"]),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count\r\nk,\"a,\"\"b\"\"\nc\",7\r\n".into(),
            expected: Expected::Loaded {
                header: strings(&["unique_id", "do_type", "count"]),
                records: vec![strings(&["k", "a,\"b\"\nc", "7"])],
            },
        },
        CsvVector {
            id: "load_header_count".into(),
            description: "Three-column document against five-column header".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count\nk,a,1\n".into(),
            expected: Expected::FieldCountMismatch {
                expected: 5,
                actual: 3,
            },
        },
        CsvVector {
            id: "load_header_field".into(),
            description: "Differing name at index 3".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count,breadth,height\n".into(),
            expected: Expected::FieldMismatch {
                index: 3,
                expected: "width".into(),
                actual: "breadth".into(),
            },
        },
        CsvVector {
            id: "load_header_unchecked".into(),
            description: "Any header accepted when validation is off".into(),
            expected_header: strings(&FIVE),
            validate_header: false,
            flexible: false,
            lenient_quotes: false,
            input: "id,name\nk,v\n".into(),
            expected: Expected::Loaded {
                header: strings(&["id", "name"]),
                records: vec![strings(&["k", "v"])],
            },
        },
        CsvVector {
            id: "load_ragged_strict".into(),
            description: "Short row rejected in strict mode".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nk,a\n".into(),
            expected: Expected::Malformed,
        },
        CsvVector {
            id: "load_ragged_flexible".into(),
            description: "Short row kept in flexible mode".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: true,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nk,a\n".into(),
            expected: Expected::Loaded {
                header: strings(&FIVE),
                records: vec![strings(&["k", "a"])],
            },
        },
        CsvVector {
            id: "load_unterminated_quote".into(),
            description: "Quoted field still open at end of input".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nk,a,1,2,\"3\n".into(),
            expected: Expected::Malformed,
        },
        CsvVector {
            id: "load_unterminated_quote_flexible".into(),
            description: "Open quote swallowing later rows is rejected in flexible mode".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: true,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nk,\"a,1,2,3\nz,b,1,2,3\n".into(),
            expected: Expected::Malformed,
        },
        CsvVector {
            id: "load_bare_quote".into(),
            description: "Quote inside an unquoted field".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: "unique_id,do_type,count,width,height\nk,a\"b,1,2,3\n".into(),
            expected: Expected::Malformed,
        },
        CsvVector {
            id: "load_bare_quote_lenient".into(),
            description: "Quote inside an unquoted field kept as text when lenient".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: true,
            input: "unique_id,do_type,count,width,height\nk,a\"b,1,2,3\n".into(),
            expected: Expected::Loaded {
                header: strings(&FIVE),
                records: vec![strings(&["k", "a\"b", "1", "2", "3"])],
            },
        },
        CsvVector {
            id: "load_empty".into(),
            description: "Empty document keeps the configured header".into(),
            expected_header: strings(&FIVE),
            validate_header: true,
            flexible: false,
            lenient_quotes: false,
            input: String::new(),
            expected: Expected::Loaded {
                header: strings(&FIVE),
                records: vec![],
            },
        },
    ]
}

/// Serializes vectors to pretty JSON.
pub fn export_json(vectors: &[CsvVector]) -> String {
    serde_json::to_string_pretty(vectors).expect("Failed to serialize vectors")
}

/// Parses vectors from JSON.
pub fn import_json(json: &str) -> Vec<CsvVector> {
    serde_json::from_str(json).expect("Failed to parse vectors")
}
