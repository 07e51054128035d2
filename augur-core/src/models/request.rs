//! Inbound events, normalized by the transport layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pair::UserId;

/// A user asking for the next-round prediction of one game on one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub user: UserId,
    pub app: String,
    pub game: String,
    pub timestamp: DateTime<Utc>,
}

/// The user's feedback on an issued prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Wrong,
}
