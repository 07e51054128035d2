//! Default values for configuration fields.

/// Shortest admissible pattern sequence.
pub const DEFAULT_MIN_PATTERN_LEN: usize = 3;

/// Longest admissible pattern sequence.
pub const DEFAULT_MAX_PATTERN_LEN: usize = 6;

/// Cooldown applied to admin-created games that don't specify one (seconds).
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;

/// How long an issued prediction may wait for a verdict (seconds).
pub const DEFAULT_PENDING_TTL_SECS: u64 = 300;
