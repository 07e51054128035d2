/// Augur system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rolling result-history window per (user, game). A history is either
/// unseeded or holds exactly this many labels.
pub const HISTORY_LEN: usize = 10;
