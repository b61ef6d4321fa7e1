//! Collision-free secondary table for the keys of one primary bucket.

use std::num::NonZeroUsize;

use rand::Rng;

use crate::consts::Key;
use crate::errors::{FksError, Level, Result};
use crate::hash::{HashFamily, HashFunction};

/// Slot table of exactly `size` slots in which every key has its own slot.
///
/// Empty slots are `None`, so every `i32` value (including `i32::MAX`) can be
/// stored.
#[derive(Clone, Debug, Default)]
pub struct PerfectBucketTable {
    hash: Option<HashFunction>,
    slots: Vec<Option<Key>>,
    len: usize,
    trials: u32,
}

impl PerfectBucketTable {
    /// The table that contains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build with the quadratic sizing `k * k` for `k` keys.
    pub fn for_bucket<R: Rng + ?Sized>(keys: &[Key], rng: &mut R) -> Self {
        Self::build(keys, keys.len() * keys.len(), rng)
    }

    /// Retry random draws until the keys land in distinct slots.
    ///
    /// Only reached through [`for_bucket`](Self::for_bucket), where
    /// `size = k * k` and a trial succeeds with probability >= 1/2. A smaller
    /// `size` may never succeed; capped callers use [`try_build`](Self::try_build).
    fn build<R: Rng + ?Sized>(keys: &[Key], size: usize, rng: &mut R) -> Self {
        let Some(family) = family_for(keys, size) else { return Self::empty() };
        let mut trials = 0u32;
        loop {
            trials = trials.saturating_add(1);
            if let Some(table) = Self::trial(keys, &family, rng, trials) {
                return table;
            }
        }
    }

    /// Build a table of `size` slots, giving up after `max_trials` draws.
    pub fn try_build<R: Rng + ?Sized>(
        keys: &[Key],
        size: usize,
        rng: &mut R,
        max_trials: u32,
    ) -> Result<Self> {
        let Some(family) = family_for(keys, size) else { return Ok(Self::empty()) };
        for trials in 1..=max_trials {
            if let Some(table) = Self::trial(keys, &family, rng, trials) {
                return Ok(table);
            }
        }
        Err(FksError::TrialsExhausted { level: Level::Secondary, trials: max_trials })
    }

    /// One atomic trial: a fresh hash and a fresh slot vector, kept only if
    /// no two distinct keys meet.
    fn trial<R: Rng + ?Sized>(
        keys: &[Key],
        family: &HashFamily,
        rng: &mut R,
        trials: u32,
    ) -> Option<Self> {
        let hash = family.draw(rng);
        let mut slots: Vec<Option<Key>> = vec![None; family.image_size()];
        let mut len = 0usize;
        for &key in keys {
            let slot = &mut slots[hash.evaluate(key)];
            match *slot {
                Some(held) if held != key => {
                    tracing::trace!(trials, held, key, "secondary collision, retrying");
                    return None;
                }
                Some(_) => {}
                None => {
                    *slot = Some(key);
                    len += 1;
                }
            }
        }
        Some(Self { hash: Some(hash), slots, len, trials })
    }

    pub fn contains(&self, key: Key) -> bool {
        let Some(hash) = &self.hash else { return false };
        self.slots[hash.evaluate(key)] == Some(key)
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Table size, occupied or not.
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    /// Trials spent before acceptance (0 for the empty table).
    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn hash(&self) -> Option<&HashFunction> {
        self.hash.as_ref()
    }

    /// Stored keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.slots.iter().flatten().copied()
    }
}

fn family_for(keys: &[Key], size: usize) -> Option<HashFamily> {
    if keys.is_empty() {
        return None;
    }
    NonZeroUsize::new(size).map(HashFamily::new)
}
