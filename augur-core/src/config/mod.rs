//! Runtime configuration, loadable from TOML.
//!
//! Every field has a default so a missing or partial file is fine.

mod catalog_config;
mod pattern_config;
mod session_config;

pub mod defaults;

pub use catalog_config::CatalogConfig;
pub use pattern_config::PatternConfig;
pub use session_config::SessionConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration for the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AugurConfig {
    pub catalog: CatalogConfig,
    pub pattern: PatternConfig,
    pub session: SessionConfig,
}

impl AugurConfig {
    /// Parse a TOML document. Unknown sections are ignored, missing ones
    /// take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load a TOML config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&raw)?)
    }
}
