//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)          -- optimal bits
//! - k = (m/n) * ln(2)                   -- optimal hash functions
//! - n = -(m/k) * ln(1 - fpr^(1/k))      -- elements a filter holds at fpr

use std::f64::consts::LN_2;

/// Minimum number of hash functions
pub const MIN_HASH_COUNT: usize = 1;

/// Maximum number of hash functions
pub const MAX_HASH_COUNT: usize = 16;

/// Maximum filter size in bits (8 MiB of filter data)
pub const MAX_SIZE_BITS: usize = 1 << 26;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter
    pub size_bits: usize,
    /// Number of hash functions
    pub hash_count: usize,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// # Arguments
/// * `num_elements` - Expected number of elements to insert (n)
/// * `target_fpr` - Target false positive rate
///
/// The size is not capped here: a pathological element count produces a
/// size that `BloomFilter::new` rejects.
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomFilterParams {
    if num_elements == 0 {
        return BloomFilterParams {
            size_bits: 1,
            hash_count: MIN_HASH_COUNT,
            expected_fpr: 1.0,
        };
    }

    let n = num_elements as f64;
    let ln2_squared = LN_2 * LN_2;

    // `as` saturates, so overflowing sizes land on usize::MAX
    let m = (-n * target_fpr.ln() / ln2_squared).ceil() as usize;
    let m = m.max(1);

    let k = ((m as f64 / n) * LN_2).round() as usize;
    let k = k.clamp(MIN_HASH_COUNT, MAX_HASH_COUNT);

    let expected_fpr = calculate_fpr(m, num_elements, k);

    BloomFilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr,
    }
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Estimate how many elements a filter can hold before its false positive
/// rate exceeds `fpr`
///
/// Inverse of [`calculate_fpr`] in n. Saturates at `usize::MAX`.
pub fn estimate_count(hash_count: usize, size_bits: usize, fpr: f64) -> usize {
    if hash_count == 0 || size_bits == 0 {
        return 0;
    }
    let k = hash_count as f64;
    let m = size_bits as f64;
    let per_hash = 1.0 - fpr.powf(1.0 / k);
    let count = (-per_hash.ln() * m / k).ceil();
    if !count.is_finite() || count < 0.0 {
        return usize::MAX;
    }
    count as usize
}
