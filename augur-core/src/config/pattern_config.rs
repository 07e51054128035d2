use serde::{Deserialize, Serialize};

use super::defaults;

/// Pattern-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Shortest sequence `add_pattern` accepts.
    pub min_len: usize,
    /// Longest sequence `add_pattern` accepts.
    pub max_len: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_len: defaults::DEFAULT_MIN_PATTERN_LEN,
            max_len: defaults::DEFAULT_MAX_PATTERN_LEN,
        }
    }
}
