use serde::{Deserialize, Serialize};

use super::defaults;

/// Prediction-session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds an issued prediction stays confirmable. A verdict arriving
    /// later finds the record expired and history untouched.
    pub pending_ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pending_ttl_secs: defaults::DEFAULT_PENDING_TTL_SECS,
        }
    }
}
