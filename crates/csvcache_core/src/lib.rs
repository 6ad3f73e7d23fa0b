//! # CSVCache Core
//!
//! An in-memory, key-indexed record cache backed by CSV documents.
//!
//! A [`RecordCache`] is loaded from any [`std::io::Read`] source whose
//! first row is a header, answers lookups by the value of each row's
//! first field, accepts new records, and writes its state back to any
//! [`std::io::Write`] sink in the same CSV dialect.
//!
//! ## Design Principles
//!
//! - The cache never opens files; callers supply readers and writers
//! - Every field is text; nothing is parsed as a number
//! - Loads are all-or-nothing; a failed load leaves the cache unchanged
//! - No internal locking; a cache has a single owner
//!
//! ## Example
//!
//! ```rust
//! use csvcache_core::{CacheConfig, Record, RecordCache, WriteOrder};
//!
//! let config = CacheConfig::legacy().write_order(WriteOrder::SortedByKey);
//! let mut cache = RecordCache::with_config(config);
//! cache.load("unique_id,do_type,count\nb,image,2\n".as_bytes()).unwrap();
//! cache.add_record(Record::new(["a", "video", "1"]).unwrap());
//!
//! let mut out = Vec::new();
//! cache.write_cache(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "unique_id,do_type,count\na,video,1\nb,image,2\n"
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod header;
mod quoting;
mod record;

pub use cache::{LoadStats, RecordCache};
pub use config::{CacheConfig, HeaderPolicy, WriteOrder};
pub use error::{CacheError, CacheResult, SyntaxError};
pub use header::{default_header, validate_header, HeaderMismatch, DEFAULT_HEADER, LEGACY_HEADER};
pub use quoting::QuoteError;
pub use record::Record;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
