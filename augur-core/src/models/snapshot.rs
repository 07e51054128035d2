//! Serde-friendly snapshot of the engine's durable state.
//!
//! The persistence collaborator decides the medium; the engine only promises
//! that a snapshot round-trips. Pending prediction records are ephemeral and
//! deliberately absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::game::Game;
use super::label::Label;
use super::pair::UserId;
use super::record::ResolvedPrediction;

/// Durable state for one (user, game) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub user: UserId,
    pub game: String,
    /// `None` when the pair's history was never seeded.
    pub history: Option<Vec<Label>>,
    /// Timestamp of the last issued prediction, if any.
    pub last_issued_at: Option<DateTime<Utc>>,
}

/// Everything the engine persists: catalog, per-pair state, and the archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSnapshot {
    pub games: Vec<Game>,
    pub apps: Vec<String>,
    pub pairs: Vec<PairSnapshot>,
    pub archive: Vec<ResolvedPrediction>,
}
