//! Mixer configuration
//!
//! Selects the mapping policy and the coefficient table a session resolves
//! its matrix with. Configuration is read once, before a session exists;
//! nothing here is consulted while mixing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChanmixError, Result};
use crate::matrix::{CoefficientTable, MappingPolicy, MatrixBuilder};

/// Settings applied when a session resolves its gain matrix
///
/// # Example
/// ```
/// use chanmix::config::MixerConfig;
/// use chanmix::matrix::MappingPolicy;
///
/// let config = MixerConfig::from_json_str(r#"{ "policy": "strict" }"#).unwrap();
/// assert_eq!(config.policy, MappingPolicy::Strict);
/// assert_eq!(config.coefficients.version, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixerConfig {
    /// Behaviour for output channels nothing maps onto
    pub policy: MappingPolicy,
    /// Gains used for exact matches and folds
    pub coefficients: CoefficientTable,
}

impl MixerConfig {
    /// Configuration that fails on unmapped output channels
    pub fn strict() -> Self {
        Self {
            policy: MappingPolicy::Strict,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MixerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ChanmixError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.coefficients.validate()
    }

    /// Matrix builder applying this configuration
    pub fn builder(&self) -> MatrixBuilder {
        MatrixBuilder::new()
            .with_policy(self.policy)
            .with_coefficients(self.coefficients)
    }
}
