//! Universal hash family `x -> ((a*x + b) mod P) mod m`.
//!
//! Keys are reinterpreted as unsigned 32-bit values before hashing, which is
//! injective over `i32`. With `P = 2^61 - 1` every key keeps a distinct
//! residue, so two distinct keys collide under a random member with
//! probability about `1/m`.

use std::num::NonZeroUsize;

use rand::Rng;

use crate::consts::{Key, PRIME};
use crate::errors::{FksError, Result};

#[inline]
fn fold(key: Key) -> u64 {
    key as u32 as u64
}

/// The family of linear hash functions into `[0, image_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFamily {
    image_size: NonZeroUsize,
    modulus: u64,
}

impl HashFamily {
    pub fn new(image_size: NonZeroUsize) -> Self {
        Self { image_size, modulus: PRIME }
    }

    /// Family over a custom prime modulus. Primality is the caller's concern;
    /// a modulus below 2 leaves no multiplier to draw and is rejected.
    pub fn with_modulus(image_size: NonZeroUsize, modulus: u64) -> Result<Self> {
        if modulus < 2 {
            return Err(FksError::InvalidConfig(format!("modulus must be >= 2, got {modulus}")));
        }
        Ok(Self { image_size, modulus })
    }

    pub fn image_size(&self) -> usize {
        self.image_size.get()
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Uniformly pick `a` in `[1, P)` and `b` in `[0, P)`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> HashFunction {
        HashFunction {
            multiplier: rng.random_range(1..self.modulus),
            increment: rng.random_range(0..self.modulus),
            modulus: self.modulus,
            image_size: self.image_size,
        }
    }
}

/// One member of a [`HashFamily`]; frozen once drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFunction {
    multiplier: u64,
    increment: u64,
    modulus: u64,
    image_size: NonZeroUsize,
}

impl HashFunction {
    #[inline]
    pub fn evaluate(&self, key: Key) -> usize {
        let x = fold(key) as u128;
        let r = (self.multiplier as u128 * x + self.increment as u128) % self.modulus as u128;
        (r % self.image_size.get() as u128) as usize
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn image_size(&self) -> usize {
        self.image_size.get()
    }
}
