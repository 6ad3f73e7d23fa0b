//! Benchmark utilities.

#![deny(unsafe_code)]

use csvcache_core::{Record, RecordCache, DEFAULT_HEADER};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric key of `len` characters.
pub fn random_key(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` five-column records with random keys.
pub fn generate_records(count: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let fields = vec![
                random_key(12),
                "image_set".to_string(),
                rng.gen_range(1..100u32).to_string(),
                rng.gen_range(16..4096u32).to_string(),
                rng.gen_range(16..4096u32).to_string(),
            ];
            Record::try_from(fields).expect("record has a key")
        })
        .collect()
}

/// Render `count` random records as a CSV document with the default header.
pub fn generate_document(count: usize) -> Vec<u8> {
    let mut cache = RecordCache::new();
    cache.extend(generate_records(count));

    let mut out = Vec::with_capacity(count * 40 + DEFAULT_HEADER.len() * 8);
    cache.write_cache(&mut out).expect("in-memory write");
    out
}
