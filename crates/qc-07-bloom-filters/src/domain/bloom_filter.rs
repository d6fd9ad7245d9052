//! Core Bloom Filter implementation
//!
//! Guarantees:
//! - FPR = (1 - e^(-kn/m))^k <= target_fpr while n <= sizing count
//! - No false negatives - if inserted, contains() MUST return true

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::hash_functions::{compute_hash_positions, salted_key};
use super::parameters::{
    calculate_fpr, calculate_optimal_parameters, MAX_HASH_COUNT, MAX_SIZE_BITS, MIN_HASH_COUNT,
};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not.
///
/// The filter itself carries no salt. Callers that share filters with
/// remote peers pass the salt alongside the serialized filter and use
/// [`BloomFilter::insert_salted`] / [`BloomFilter::contains_salted`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    #[serde(with = "bitvec_serde")]
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Number of elements inserted (n)
    n: usize,
}

/// Serde support for BitVec
mod bitvec_serde {
    use bitvec::prelude::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bits: &BitVec<u8, Lsb0>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes: Vec<u8> = bits.as_raw_slice().to_vec();
        (bytes, bits.len()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitVec<u8, Lsb0>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (bytes, len): (Vec<u8>, usize) = Deserialize::deserialize(deserializer)?;
        let mut bits = BitVec::<u8, Lsb0>::from_vec(bytes);
        bits.truncate(len);
        Ok(bits)
    }
}

impl BloomFilter {
    /// Create a new Bloom filter with specified parameters
    ///
    /// # Arguments
    /// * `m` - Size in bits
    /// * `k` - Number of hash functions
    ///
    /// # Errors
    /// `InvalidParameters` if k is outside `[MIN_HASH_COUNT, MAX_HASH_COUNT]`
    /// or m is zero; `FilterTooLarge` if m exceeds `MAX_SIZE_BITS`.
    pub fn new(m: usize, k: usize) -> Result<Self, FilterError> {
        validate_parameters(m, k)?;
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; m],
            k,
            m,
            n: 0,
        })
    }

    /// Create a new Bloom filter with optimal parameters for target FPR
    ///
    /// # Arguments
    /// * `expected_elements` - Expected number of elements (n)
    /// * `target_fpr` - Target false positive rate
    pub fn new_with_fpr(expected_elements: usize, target_fpr: f64) -> Result<Self, FilterError> {
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(FilterError::InvalidFPR { fpr: target_fpr });
        }
        let params = calculate_optimal_parameters(expected_elements, target_fpr);
        Self::new(params.size_bits, params.hash_count)
    }

    /// Insert an element into the filter
    ///
    /// After insertion, `contains(element)` is guaranteed to return true.
    pub fn insert(&mut self, element: &[u8]) {
        for pos in compute_hash_positions(element, self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    pub fn contains(&self, element: &[u8]) -> bool {
        compute_hash_positions(element, self.k, self.m)
            .iter()
            .all(|&pos| self.bits[pos])
    }

    /// Insert `key` mixed with `salt`
    pub fn insert_salted(&mut self, key: &[u8], salt: &[u8]) {
        self.insert(&salted_key(key, salt));
    }

    /// Test `key` mixed with `salt`
    pub fn contains_salted(&self, key: &[u8], salt: &[u8]) -> bool {
        self.contains(&salted_key(key, salt))
    }

    /// Calculate the current false positive rate
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of elements inserted
    pub fn count(&self) -> usize {
        self.n
    }

    /// Serialize the filter to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        bincode::serialize(self).map_err(|e| FilterError::SerializationError(e.to_string()))
    }

    /// Deserialize a filter from bytes
    ///
    /// Filters received from peers are untrusted: the decoded parameters are
    /// validated the same way as locally built filters.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        let filter: Self = bincode::deserialize(bytes)
            .map_err(|e| FilterError::SerializationError(e.to_string()))?;
        validate_parameters(filter.m, filter.k)?;
        if filter.bits.len() != filter.m {
            return Err(FilterError::InvalidParameters(format!(
                "bit length {} does not match size {}",
                filter.bits.len(),
                filter.m
            )));
        }
        Ok(filter)
    }

    /// Calculate optimal parameters for given constraints
    ///
    /// Returns `(k, m)`.
    pub fn optimal_params(n: usize, fpr: f64) -> (usize, usize) {
        let params = calculate_optimal_parameters(n, fpr);
        (params.hash_count, params.size_bits)
    }
}

fn validate_parameters(m: usize, k: usize) -> Result<(), FilterError> {
    if !(MIN_HASH_COUNT..=MAX_HASH_COUNT).contains(&k) {
        return Err(FilterError::InvalidParameters(format!(
            "hash count {} outside [{}, {}]",
            k, MIN_HASH_COUNT, MAX_HASH_COUNT
        )));
    }
    if m == 0 {
        return Err(FilterError::InvalidParameters(
            "size_bits cannot be 0".to_string(),
        ));
    }
    if m > MAX_SIZE_BITS {
        return Err(FilterError::FilterTooLarge {
            size: m,
            max: MAX_SIZE_BITS,
        });
    }
    Ok(())
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_no_false_negatives_after_later_inserts(
            keys in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..40), 1..200),
            salt in proptest::collection::vec(any::<u8>(), 0..32),
        ) {
            let mut filter = BloomFilter::new_with_fpr(keys.len(), 0.01).unwrap();
            for (i, key) in keys.iter().enumerate() {
                filter.insert_salted(key, &salt);
                for earlier in &keys[..=i] {
                    prop_assert!(filter.contains_salted(earlier, &salt));
                }
            }
            prop_assert_eq!(filter.count(), keys.len());
        }
    }
}
