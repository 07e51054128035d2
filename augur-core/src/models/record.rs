//! Prediction records: the pending in-flight record, the archived resolution,
//! and the log-channel emission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::label::Label;
use super::pair::UserId;
use super::request::Verdict;

/// Handle the transport layer uses to confirm or deny an issued prediction.
pub type PendingId = Uuid;

/// Lifecycle of a prediction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionStatus {
    /// Issued, awaiting the user's verdict.
    Pending,
    /// User confirmed the outcome; history was advanced.
    Correct,
    /// User denied the outcome; history untouched.
    Wrong,
    /// The confirmation window elapsed before a verdict arrived.
    Expired,
    /// A newer request for the same pair replaced this one.
    Superseded,
}

/// One outstanding (or just-resolved) prediction for a (user, game) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: PendingId,
    pub user: UserId,
    pub app: String,
    pub game: String,
    /// The outcome the matcher chose.
    pub outcome: Label,
    /// How many patterns voted for the chosen outcome.
    pub match_count: usize,
    /// The history snapshot the outcome was computed from.
    pub history: Vec<Label>,
    pub issued_at: DateTime<Utc>,
    pub status: PredictionStatus,
}

/// Archive row: a prediction the user has given a verdict on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrediction {
    pub user: UserId,
    pub app: String,
    pub game: String,
    pub outcome: Label,
    pub verdict: Verdict,
    pub resolved_at: DateTime<Utc>,
}

/// Record emitted to the external log sink on a correct confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub app: String,
    pub game: String,
    pub outcome: Label,
    pub timestamp: DateTime<Utc>,
}
