//! Build-time knobs for [`StaticIntSet::try_build`](crate::StaticIntSet::try_build).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MEMORY_FACTOR;
use crate::errors::{FksError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Accept a primary hash once `sum(size^2) < memory_factor * n`.
    pub memory_factor: u32,
    /// Seed for the build's generator; OS entropy when absent.
    pub seed: Option<u64>,
    /// Cap on primary draws; unbounded when absent.
    pub max_primary_trials: Option<u32>,
    /// Cap on draws per secondary table; unbounded when absent.
    pub max_secondary_trials: Option<u32>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            memory_factor: MEMORY_FACTOR,
            seed: None,
            max_primary_trials: None,
            max_secondary_trials: None,
        }
    }
}

impl BuildConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Since `sum(size^2) >= n`, a factor of 1 or less can never be met.
    pub fn validate(&self) -> Result<()> {
        if self.memory_factor <= 1 {
            return Err(FksError::InvalidConfig(format!(
                "memory_factor must be > 1, got {}",
                self.memory_factor
            )));
        }
        if self.max_primary_trials == Some(0) {
            return Err(FksError::InvalidConfig("max_primary_trials must be > 0".into()));
        }
        if self.max_secondary_trials == Some(0) {
            return Err(FksError::InvalidConfig("max_secondary_trials must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_classic_scheme() {
        let cfg = BuildConfig::default();
        assert_eq!(cfg.memory_factor, 4);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{ "seed": 99 }}"#).unwrap();
        let cfg = BuildConfig::from_json_file(f.path()).unwrap();
        assert_eq!(cfg, BuildConfig::seeded(99));
    }

    #[test]
    fn rejects_unsatisfiable_memory_factor() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{ "memory_factor": 1 }}"#).unwrap();
        let err = BuildConfig::from_json_file(f.path()).unwrap_err();
        assert!(matches!(err, FksError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_trial_caps() {
        let cfg = BuildConfig { max_secondary_trials: Some(0), ..BuildConfig::default() };
        assert!(matches!(cfg.validate(), Err(FksError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "not json").unwrap();
        let err = BuildConfig::from_json_file(f.path()).unwrap_err();
        assert!(matches!(err, FksError::SerdeJson(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FksError::Io(_)));
    }
}
