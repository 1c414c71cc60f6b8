//! Validator configuration.
//!
//! Limits that protect the evaluator against pathological input. Schemas and
//! documents often arrive from untrusted callers, so nesting depth and
//! reference chains are bounded. Defaults suit any realistic schema;
//! override via environment variables or explicit construction.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding [`ValidatorConfig::max_depth`].
pub const MAX_DEPTH_VAR: &str = "JSONSTRUCT_MAX_DEPTH";

/// Environment variable overriding [`ValidatorConfig::max_reference_chain`].
pub const MAX_REFERENCE_CHAIN_VAR: &str = "JSONSTRUCT_MAX_REFERENCE_CHAIN";

/// Limits applied to every validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum number of nested schema nodes evaluated along one path.
    pub max_depth: usize,
    /// Maximum number of `$ref` hops followed to reach a concrete node.
    pub max_reference_chain: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_reference_chain: 32,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `JSONSTRUCT_MAX_DEPTH` (default: 128)
    /// - `JSONSTRUCT_MAX_REFERENCE_CHAIN` (default: 32)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_depth: env_limit(MAX_DEPTH_VAR, defaults.max_depth)?,
            max_reference_chain: env_limit(MAX_REFERENCE_CHAIN_VAR, defaults.max_reference_chain)?,
        })
    }
}

fn env_limit(var: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => parse_limit(var, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_limit(var: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}
