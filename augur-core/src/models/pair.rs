//! The (user, game) key all per-user state is addressed by.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat-layer user identifier.
pub type UserId = i64;

/// Addresses one user's state for one game. History, cooldown, and session
/// state are all keyed by this pair; different pairs are fully independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub user: UserId,
    pub game: String,
}

impl PairKey {
    pub fn new(user: UserId, game: impl Into<String>) -> Self {
        Self {
            user,
            game: game.into(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.game)
    }
}
