//! Uniform sampling without replacement.
//!
//! Lazy Fisher-Yates: only the swapped positions are remembered, so drawing
//! `k` of `n` indices costs O(k) time and memory regardless of `n`.

use rand::Rng;
use std::collections::HashMap;

/// Draws distinct indices in `[0, n)` uniformly at random
#[derive(Debug)]
pub struct UniformSampler<R: Rng> {
    rng: R,
    length: usize,
    drawn: HashMap<usize, usize>,
    drawn_count: usize,
}

impl UniformSampler<rand::rngs::ThreadRng> {
    /// Sampler over `[0, length)` backed by the thread-local RNG
    pub fn new(length: usize) -> Self {
        Self::with_rng(rand::thread_rng(), length)
    }
}

impl<R: Rng> UniformSampler<R> {
    /// Sampler over `[0, length)` backed by `rng`
    pub fn with_rng(rng: R, length: usize) -> Self {
        Self {
            rng,
            length,
            drawn: HashMap::new(),
            drawn_count: 0,
        }
    }

    /// Restart sampling over `[0, length)`
    pub fn initialize(&mut self, length: usize) {
        self.length = length;
        self.drawn.clear();
        self.drawn_count = 0;
    }

    /// Number of indices not yet drawn
    pub fn remaining(&self) -> usize {
        self.length - self.drawn_count
    }
}

impl<R: Rng> Iterator for UniformSampler<R> {
    type Item = usize;

    /// Next distinct index, or `None` once all `length` have been drawn
    fn next(&mut self) -> Option<usize> {
        if self.drawn_count >= self.length {
            return None;
        }

        let draw = self.rng.gen_range(self.drawn_count..self.length);
        let value = self.drawn.get(&draw).copied().unwrap_or(draw);
        let replacement = self
            .drawn
            .remove(&self.drawn_count)
            .unwrap_or(self.drawn_count);
        if draw != self.drawn_count {
            self.drawn.insert(draw, replacement);
        }
        self.drawn_count += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_empty_sampler_is_exhausted() {
        let mut sampler = UniformSampler::new(0);
        assert_eq!(sampler.next(), None);
    }

    #[test]
    fn test_draws_every_index_exactly_once() {
        let sampler = UniformSampler::with_rng(StdRng::seed_from_u64(7), 100);
        let drawn: Vec<usize> = sampler.collect();

        assert_eq!(drawn.len(), 100);
        let unique: HashSet<usize> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 100);
        assert!(drawn.iter().all(|&i| i < 100));
    }

    #[test]
    fn test_initialize_restarts() {
        let mut sampler = UniformSampler::with_rng(StdRng::seed_from_u64(1), 3);
        assert_eq!(sampler.by_ref().count(), 3);
        assert_eq!(sampler.next(), None);

        sampler.initialize(2);
        assert_eq!(sampler.remaining(), 2);
        let drawn: HashSet<usize> = sampler.collect();
        assert_eq!(drawn, HashSet::from([0, 1]));
    }

    #[test]
    fn test_first_draw_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let mut sampler = UniformSampler::with_rng(&mut rng, 4);
            if let Some(i) = sampler.next() {
                counts[i] += 1;
            }
        }
        // Expect ~1000 each
        for count in counts {
            assert!((800..=1200).contains(&count), "count {} not ~1000", count);
        }
    }
}
