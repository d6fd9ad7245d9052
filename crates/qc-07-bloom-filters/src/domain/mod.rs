//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Hash functions (murmur3 positions, SHA-256 salting)
//! - Parameter calculations
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bloom_filter;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::BloomFilter;
pub use hash_functions::{salted_key, SALTED_KEY_LEN};
pub use parameters::{
    calculate_fpr, calculate_optimal_parameters, estimate_count, BloomFilterParams,
    MAX_HASH_COUNT, MAX_SIZE_BITS, MIN_HASH_COUNT,
};
