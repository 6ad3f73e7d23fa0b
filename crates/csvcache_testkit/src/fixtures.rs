//! Test fixtures and cache helpers.
//!
//! Provides the reference fixture documents and temp-file backed caches
//! for tests that exercise real readers and writers.

use csvcache_core::{CacheConfig, RecordCache};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// The reference five-column fixture document.
pub const BASIC_CSV: &str = include_str!("../testdata/basic.csv");

/// Keys present in [`BASIC_CSV`].
pub const BASIC_KEYS: [&str; 4] = ["m63xss7g", "ghx3fpf7", "zkh18f2c", "xgxd28gq"];

/// A three-column fixture document.
pub const LEGACY_CSV: &str = include_str!("../testdata/legacy.csv");

/// Installs a test-friendly `tracing` subscriber.
///
/// Honours `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A CSV file inside a temporary directory that is removed on drop.
pub struct TempCsvFile {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TempCsvFile {
    /// Creates a handle for `name` inside a fresh temporary directory.
    ///
    /// The file itself is not created until it is written.
    pub fn new(name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self {
            path: temp_dir.path().join(name),
            _temp_dir: temp_dir,
        }
    }

    /// Creates a temporary file holding `contents`.
    pub fn with_contents(name: &str, contents: &str) -> Self {
        let file = Self::new(name);
        std::fs::write(&file.path, contents).expect("Failed to write fixture file");
        file
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file for reading.
    pub fn reader(&self) -> BufReader<File> {
        BufReader::new(File::open(&self.path).expect("Failed to open fixture file"))
    }

    /// Creates (or truncates) the file for writing.
    pub fn writer(&self) -> BufWriter<File> {
        BufWriter::new(File::create(&self.path).expect("Failed to create fixture file"))
    }

    /// Returns the file contents.
    pub fn contents(&self) -> String {
        std::fs::read_to_string(&self.path).expect("Failed to read fixture file")
    }

    /// Loads the file into `cache`.
    pub fn load_into(&self, cache: &mut RecordCache) {
        cache
            .load(self.reader())
            .expect("Failed to load fixture file");
    }

    /// Writes `cache` to the file.
    pub fn write_from(&self, cache: &RecordCache) {
        cache
            .write_cache(self.writer())
            .expect("Failed to write cache");
    }
}

/// Creates a default-configured cache loaded from `doc`.
pub fn loaded_cache(doc: &str) -> RecordCache {
    loaded_cache_with(CacheConfig::default(), doc)
}

/// Creates a cache with `config` loaded from `doc`.
pub fn loaded_cache_with(config: CacheConfig, doc: &str) -> RecordCache {
    let mut cache = RecordCache::with_config(config);
    cache
        .load(doc.as_bytes())
        .expect("Failed to load fixture document");
    cache
}

/// Runs a test against a cache loaded from [`BASIC_CSV`] through a real file.
///
/// # Example
///
/// ```rust
/// use csvcache_testkit::with_basic_cache;
///
/// with_basic_cache(|cache| {
///     assert!(cache.get_record("ghx3fpf7").is_some());
///     assert!(!cache.is_modified());
/// });
/// ```
pub fn with_basic_cache<F, R>(f: F) -> R
where
    F: FnOnce(&mut RecordCache) -> R,
{
    let file = TempCsvFile::with_contents("basic.csv", BASIC_CSV);
    let mut cache = RecordCache::new();
    file.load_into(&mut cache);
    f(&mut cache)
}
