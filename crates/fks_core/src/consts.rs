// crates/fks_core/src/consts.rs

/// Keys stored by the set.
pub type Key = i32;

/// Mersenne prime 2^61 - 1; the modulus of every hash function in the family.
/// Larger than the key domain, so distinct keys never share a residue.
pub const PRIME: u64 = (1u64 << 61) - 1;

/// Mersenne prime 2^31 - 1. Too small for `i32` keys: `x` and `x + MERSENNE_31`
/// have the same residue.
pub const MERSENNE_31: u64 = (1u64 << 31) - 1;

/// Primary hash is accepted once `sum(size^2) < MEMORY_FACTOR * n`.
pub const MEMORY_FACTOR: u32 = 4;

const _: () = { assert!(PRIME > u32::MAX as u64); };
