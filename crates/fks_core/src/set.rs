//! Two-level static set: a primary hash into `n` buckets, then one
//! [`PerfectBucketTable`] per bucket.
//!
//! Construction retries the primary draw until `sum(size^2) < factor * n`,
//! which keeps the secondary tables linear in `n` overall. Lookups cost two
//! hash evaluations and one comparison.

use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::bucket::PerfectBucketTable;
use crate::config::BuildConfig;
use crate::consts::{Key, MEMORY_FACTOR};
use crate::errors::{FksError, Level, Result};
use crate::hash::{HashFamily, HashFunction};

/// Counters recorded while building a [`StaticIntSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Distinct keys stored.
    pub keys: usize,
    pub primary_trials: u32,
    /// Trials summed over all secondary tables.
    pub secondary_trials: u64,
    /// `sum(size^2)` over the accepted primary buckets.
    pub sum_of_squares: u64,
    /// Secondary slots allocated; equals `sum_of_squares`.
    pub total_slots: usize,
}

/// Immutable membership set over `i32` keys with worst-case O(1) lookups.
#[derive(Clone, Debug, Default)]
pub struct StaticIntSet {
    primary: Option<HashFunction>,
    buckets: Vec<PerfectBucketTable>,
    stats: BuildStats,
}

impl StaticIntSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `keys` drawing randomness from `rng`. Never fails.
    pub fn build<I, R>(keys: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = Key>,
        R: Rng + ?Sized,
    {
        let keys = distinct(keys);
        let Some(family) = primary_family(&keys) else { return Self::empty() };

        let mut trials = 0u32;
        let accepted = loop {
            trials = trials.saturating_add(1);
            if let Some(found) = primary_trial(&keys, &family, MEMORY_FACTOR, rng, trials) {
                break found;
            }
        };
        let tables = accepted
            .1
            .iter()
            .map(|b| PerfectBucketTable::for_bucket(b, rng))
            .collect();
        Self::assemble(keys.len(), accepted, tables, trials)
    }

    /// Reproducible build from a fixed seed.
    pub fn build_seeded<I>(keys: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        Self::build(keys, &mut StdRng::seed_from_u64(seed))
    }

    /// Build honouring `cfg`: its memory factor, seed and trial caps.
    pub fn try_build<I>(keys: I, cfg: &BuildConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Key>,
    {
        cfg.validate()?;
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::try_build_with(keys, cfg, &mut rng)
    }

    /// [`try_build`](Self::try_build) with a caller-owned generator; `cfg.seed` is ignored.
    pub fn try_build_with<I, R>(keys: I, cfg: &BuildConfig, rng: &mut R) -> Result<Self>
    where
        I: IntoIterator<Item = Key>,
        R: Rng + ?Sized,
    {
        cfg.validate()?;
        let keys = distinct(keys);
        let Some(family) = primary_family(&keys) else { return Ok(Self::empty()) };

        let mut trials = 0u32;
        let accepted = loop {
            trials = trials.saturating_add(1);
            if let Some(found) = primary_trial(&keys, &family, cfg.memory_factor, rng, trials) {
                break found;
            }
            if cfg.max_primary_trials.is_some_and(|cap| trials >= cap) {
                return Err(FksError::TrialsExhausted { level: Level::Primary, trials });
            }
        };
        let tables = accepted
            .1
            .iter()
            .map(|b| match cfg.max_secondary_trials {
                Some(cap) => PerfectBucketTable::try_build(b, b.len() * b.len(), rng, cap),
                None => Ok(PerfectBucketTable::for_bucket(b, rng)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(keys.len(), accepted, tables, trials))
    }

    fn assemble(
        keys: usize,
        (primary, buckets): (HashFunction, Vec<Vec<Key>>),
        tables: Vec<PerfectBucketTable>,
        primary_trials: u32,
    ) -> Self {
        let stats = BuildStats {
            keys,
            primary_trials,
            secondary_trials: tables.iter().map(|t| t.trials() as u64).sum(),
            sum_of_squares: sum_of_squares(&buckets),
            total_slots: tables.iter().map(PerfectBucketTable::slots).sum(),
        };
        tracing::debug!(
            keys,
            primary_trials,
            secondary_trials = stats.secondary_trials,
            total_slots = stats.total_slots,
            "static set built"
        );
        Self { primary: Some(primary), buckets: tables, stats }
    }

    pub fn contains(&self, key: Key) -> bool {
        let Some(primary) = &self.primary else { return false };
        self.buckets[primary.evaluate(key)].contains(key)
    }

    pub fn len(&self) -> usize {
        self.stats.keys
    }

    pub fn is_empty(&self) -> bool {
        self.stats.keys == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn buckets(&self) -> &[PerfectBucketTable] {
        &self.buckets
    }

    /// Stored keys, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.buckets.iter().flat_map(PerfectBucketTable::keys)
    }
}

impl FromIterator<Key> for StaticIntSet {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self::build(iter, &mut rand::rng())
    }
}

fn distinct<I: IntoIterator<Item = Key>>(keys: I) -> Vec<Key> {
    let mut keys: Vec<Key> = keys.into_iter().collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

fn primary_family(keys: &[Key]) -> Option<HashFamily> {
    NonZeroUsize::new(keys.len()).map(HashFamily::new)
}

fn sum_of_squares(buckets: &[Vec<Key>]) -> u64 {
    buckets.iter().map(|b| (b.len() as u64) * (b.len() as u64)).sum()
}

/// One primary trial: draw, partition, check the memory bound.
fn primary_trial<R: Rng + ?Sized>(
    keys: &[Key],
    family: &HashFamily,
    memory_factor: u32,
    rng: &mut R,
    trials: u32,
) -> Option<(HashFunction, Vec<Vec<Key>>)> {
    let hash = family.draw(rng);
    let mut buckets: Vec<Vec<Key>> = vec![Vec::new(); family.image_size()];
    for &key in keys {
        buckets[hash.evaluate(key)].push(key);
    }
    let total = sum_of_squares(&buckets);
    let bound = memory_factor as u64 * keys.len() as u64;
    if total < bound {
        Some((hash, buckets))
    } else {
        tracing::trace!(trials, total, bound, "primary hash over memory bound, retrying");
        None
    }
}
