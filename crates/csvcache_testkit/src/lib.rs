//! # CSVCache Testkit
//!
//! Test utilities for CSVCache.
//!
//! This crate provides:
//! - Fixture documents and temp-file backed caches
//! - Property-based test generators using proptest
//! - A model-checking harness for integration tests
//! - Shared CSV test vectors with JSON export
//!
//! ## Usage
//!
//! ```rust
//! use csvcache_testkit::prelude::*;
//!
//! let cache = loaded_cache(BASIC_CSV);
//! let copy = round_trip(&cache);
//! assert_same_contents(&cache, &copy);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use vectors::*;
