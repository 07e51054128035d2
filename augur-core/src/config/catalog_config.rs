use serde::{Deserialize, Serialize};

use super::defaults;

/// Game-catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Cooldown for admin-created games that don't specify one (seconds).
    pub default_cooldown_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_cooldown_secs: defaults::DEFAULT_COOLDOWN_SECS,
        }
    }
}
