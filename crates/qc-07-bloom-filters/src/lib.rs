//! # QC-07 Bloom Filters
//!
//! Salted Bloom filters used to summarize which validator IPs a node already
//! knows, so peers can skip re-gossiping them.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: Core probabilistic data structure
//!   - `calculate_optimal_parameters` / `estimate_count`: sizing
//!   - `salted_key`: salt mixing shared with remote peers
//!
//! ## Invariants
//!
//! - FPR = (1 - e^(-kn/m))^k <= target_fpr
//! - No false negatives - if inserted, contains() MUST return true
//!
//! ## Usage Example
//!
//! ```
//! use qc_07_bloom_filters::{estimate_count, BloomFilter};
//!
//! let mut filter = BloomFilter::new_with_fpr(128, 0.001).unwrap();
//! filter.insert_salted(b"gossip-id", b"salt");
//! assert!(filter.contains_salted(b"gossip-id", b"salt"));
//!
//! // How many entries before the rate degrades past 1%
//! let max = estimate_count(filter.hash_count(), filter.size_bits(), 0.01);
//! assert!(max > 128);
//! ```

pub mod domain;
pub mod error;

pub use domain::{
    calculate_fpr, calculate_optimal_parameters, estimate_count, salted_key, BloomFilter,
    BloomFilterParams, MAX_HASH_COUNT, MAX_SIZE_BITS, MIN_HASH_COUNT, SALTED_KEY_LEN,
};
pub use error::FilterError;
