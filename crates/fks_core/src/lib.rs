//! Static integer sets with worst-case O(1) membership queries, built by
//! two-level (FKS) perfect hashing.
//!
//! ```
//! use fks_core::StaticIntSet;
//!
//! let set = StaticIntSet::build_seeded([1, 2, 3, 100], 7);
//! assert!(set.contains(100));
//! assert!(!set.contains(50));
//! ```

pub mod consts;
pub mod errors;
pub mod config;
pub mod hash;
pub mod bucket;
pub mod set;

pub use bucket::PerfectBucketTable;
pub use config::BuildConfig;
pub use consts::Key;
pub use errors::{FksError, Level, Result};
pub use hash::{HashFamily, HashFunction};
pub use set::{BuildStats, StaticIntSet};
