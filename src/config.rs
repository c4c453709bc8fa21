//! Mock configuration.
//!
//! A [`MockConfig`] is fixed when a mock is built and is shared by its
//! behavior registry, call ledger and argument matcher, so all three agree on
//! what "the same arguments" means.

use mimic_value::FingerprintPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid mock config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockConfig {
    /// Treat object keys whose value is `undefined` as absent when comparing
    /// arguments. On by default; turn off to make such keys significant.
    pub ignore_undefined_keys: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            ignore_undefined_keys: true,
        }
    }
}

impl MockConfig {
    /// Config where every object key counts, including undefined-valued ones.
    pub fn strict() -> Self {
        Self {
            ignore_undefined_keys: false,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn policy(&self) -> FingerprintPolicy {
        FingerprintPolicy {
            ignore_undefined_keys: self.ignore_undefined_keys,
        }
    }
}
