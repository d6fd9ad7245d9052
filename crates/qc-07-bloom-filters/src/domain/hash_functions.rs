//! Hash functions for Bloom filter
//!
//! Uses MurmurHash3 for bit positions and SHA-256 for salting keys.
//!
//! Salting happens before positions are derived: a salted key is
//! `SHA-256(salt || key)`, and the k positions are computed over that digest.
//! Two peers that share a salt agree on every position, while a rotated salt
//! moves every key to fresh positions.

use sha2::{Digest, Sha256};
use std::io::Cursor;

/// Size of a salted key digest in bytes
pub const SALTED_KEY_LEN: usize = 32;

/// Hash an element with MurmurHash3 using a seed
pub fn murmur_hash(element: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(element);

    // Use murmur3 128-bit hash and take the lower 64 bits
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Compute k hash positions for an element
///
/// Uses double hashing technique: h(i) = h1 + i * h2
pub fn compute_hash_positions(element: &[u8], k: usize, m: usize) -> Vec<usize> {
    let h1 = murmur_hash(element, 0);
    let h2 = murmur_hash(element, 1);

    (0..k)
        .map(|i| {
            let hash = h1.wrapping_add((i as u64).wrapping_mul(h2));
            (hash % m as u64) as usize
        })
        .collect()
}

/// Mix a salt into a key: `SHA-256(salt || key)`
pub fn salted_key(key: &[u8], salt: &[u8]) -> [u8; SALTED_KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(key);
    hasher.finalize().into()
}
