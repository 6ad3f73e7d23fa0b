//! Cache configuration.

use crate::header::{default_header, to_owned_header, LEGACY_HEADER};

/// How the header row of a loaded document is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// The header must match the expected header exactly.
    #[default]
    Validate,
    /// Any header is accepted and replaces the current one.
    AcceptAny,
}

/// Row order used when writing a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteOrder {
    /// Map iteration order. Not stable across runs.
    #[default]
    Unordered,
    /// Rows sorted by key, for reproducible output.
    SortedByKey,
}

/// Configuration for a [`crate::RecordCache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Header installed at construction and checked on load.
    pub expected_header: Vec<String>,

    /// Whether loaded headers are validated.
    pub header_policy: HeaderPolicy,

    /// Whether data rows may differ in width from the header row.
    pub flexible: bool,

    /// Whether stray and unterminated quotes are tolerated on load.
    pub lenient_quotes: bool,

    /// Row order for [`crate::RecordCache::write_cache`].
    pub write_order: WriteOrder,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expected_header: default_header(),
            header_policy: HeaderPolicy::Validate,
            flexible: false,
            lenient_quotes: false,
            write_order: WriteOrder::Unordered,
        }
    }
}

impl CacheConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for documents using the three-column layout.
    #[must_use]
    pub fn legacy() -> Self {
        Self::default().expected_header(to_owned_header(&LEGACY_HEADER))
    }

    /// Sets the expected header.
    #[must_use]
    pub fn expected_header<I, S>(mut self, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_header = header.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the header policy.
    #[must_use]
    pub const fn header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }

    /// Accepts any header on load.
    #[must_use]
    pub const fn skip_header_validation(self) -> Self {
        self.header_policy(HeaderPolicy::AcceptAny)
    }

    /// Sets whether ragged data rows are accepted on load.
    #[must_use]
    pub const fn flexible(mut self, value: bool) -> Self {
        self.flexible = value;
        self
    }

    /// Sets whether broken quoting is tolerated on load.
    ///
    /// When set, a bare quote is kept as text and an unclosed quoted field
    /// runs to end of input.
    #[must_use]
    pub const fn lenient_quotes(mut self, value: bool) -> Self {
        self.lenient_quotes = value;
        self
    }

    /// Sets the row order used when writing.
    #[must_use]
    pub const fn write_order(mut self, order: WriteOrder) -> Self {
        self.write_order = order;
        self
    }
}
