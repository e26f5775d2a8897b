//! Deterministic random number generation.
//!
//! RULE: Nothing in the randomizer may call any platform RNG.
//! All randomness flows through RandomStream instances handed out by
//! the SeedHierarchy.
//!
//! A stream is consumed linearly by a single owner. The ORDER in which a
//! module calls these operations is part of its observable output:
//! reordering two calls changes every later draw for every seed.

use crate::error::{RandoError, RandoResult};
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic random stream for a single task.
pub struct RandomStream {
    pub name: String,
    inner:    Pcg64Mcg,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self {
            name:  "unnamed".to_string(),
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform integer in [min, max], both inclusive.
    pub fn next_int_in_range(&mut self, min: i64, max: i64) -> RandoResult<i64> {
        if min > max {
            return Err(RandoError::InvalidRange { min, max });
        }
        Ok(self.inner.gen_range(min..=max))
    }

    /// Coin flip.
    pub fn next_bool(&mut self) -> bool {
        self.inner.gen_range(0..2) == 0
    }

    /// True with probability `percentage / 100`.
    pub fn next_bool_with_percentage(&mut self, percentage: i64) -> RandoResult<bool> {
        if !(0..=100).contains(&percentage) {
            return Err(RandoError::InvalidRange { min: percentage, max: 100 });
        }
        Ok(self.inner.gen_range(0..100) < percentage)
    }

    /// Uniform pick. Does not touch `items`.
    pub fn pick_one<'a, T>(&mut self, items: &'a [T]) -> RandoResult<&'a T> {
        if items.is_empty() {
            return Err(RandoError::EmptyInput { operation: "pick one value" });
        }
        let index = self.index_below(items.len());
        Ok(&items[index])
    }

    /// Uniform pick that removes the chosen element from the caller's vec.
    pub fn pick_and_remove<T>(&mut self, items: &mut Vec<T>) -> RandoResult<T> {
        if items.is_empty() {
            return Err(RandoError::EmptyInput { operation: "pick and remove a value" });
        }
        let index = self.index_below(items.len());
        Ok(items.remove(index))
    }

    /// Up to `count` distinct elements, sampled without replacement from a
    /// private copy of `items`. Returns fewer when the pool is smaller.
    pub fn pick_many_distinct<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        let iterations = count.min(pool.len());
        let mut picked = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let index = self.index_below(pool.len());
            picked.push(pool.remove(index));
        }
        picked
    }

    /// Pick proportionally to the paired weights. Zero-weight entries are
    /// never chosen; an all-zero or empty table is an error.
    pub fn weighted_pick<'a, T>(&mut self, items: &'a [(T, u32)]) -> RandoResult<&'a T> {
        let total: u64 = items.iter().map(|(_, w)| u64::from(*w)).sum();
        if total == 0 {
            return Err(RandoError::EmptyInput { operation: "make a weighted pick" });
        }
        let mut roll = self.inner.gen_range(0..total);
        for (item, weight) in items {
            let weight = u64::from(*weight);
            if roll < weight {
                return Ok(item);
            }
            roll -= weight;
        }
        // Unreachable: roll < total.
        Err(RandoError::EmptyInput { operation: "make a weighted pick" })
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index_below(i + 1);
            items.swap(i, j);
        }
    }

    /// Uniform index in [0, len). Sampled as u64 so 32- and 64-bit
    /// targets draw the same sequence.
    fn index_below(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len as u64) as usize
    }
}
