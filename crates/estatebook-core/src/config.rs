//! Engine configuration
//!
//! Loaded from TOML. Every section and field has a default, so an empty
//! document is a valid configuration.
//!
//! ```toml
//! [resolver]
//! min_distance = 1
//! length_divisor = 4
//!
//! [confirmation]
//! require_for_dependents = true
//!
//! [logging]
//! profile = "development"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EstateError, Result};
use crate::logging_facility::Profile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub resolver: ResolverConfig,
    pub confirmation: ConfirmationConfig,
    pub logging: LoggingConfig,
}

/// Near-miss acceptance for name resolution
///
/// A candidate is suggested when its edit distance to the target is at most
/// `max(min_distance, target_len / length_divisor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub min_distance: usize,
    pub length_divisor: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_distance: 1,
            length_divisor: 4,
        }
    }
}

impl ResolverConfig {
    /// Largest accepted distance for a target of `target_len` characters
    pub fn threshold(&self, target_len: usize) -> usize {
        let scaled = target_len.checked_div(self.length_divisor).unwrap_or(0);
        self.min_distance.max(scaled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Ask before deleting a client that listings depend on
    pub require_for_dependents: bool,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            require_for_dependents: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Development,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `Config` if the document is not valid TOML or has wrongly typed fields.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(s).map_err(|e| EstateError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| EstateError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Install the global log subscriber for the configured profile
    pub fn init_logging(&self) {
        crate::logging_facility::init(self.logging.profile);
    }

    fn validate(&self) -> Result<()> {
        if self.resolver.length_divisor == 0 {
            return Err(EstateError::Config {
                message: "resolver.length_divisor must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
