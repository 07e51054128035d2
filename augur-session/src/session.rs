//! Per-(user, game) session state.
//!
//! `Gated` and `Matching` never outlive a single facade call; only the
//! states a session can rest in between calls are represented here.

use augur_core::models::PredictionRecord;

/// Where a pair's session currently rests.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No request in flight.
    Idle,
    /// A request arrived before the pair's history was seeded; the transport
    /// layer is collecting the user's last results.
    AwaitingSeed,
    /// A prediction is issued and awaiting the user's verdict.
    Issued(PredictionRecord),
}

/// Session state for one (user, game) pair. All mutation happens while the
/// facade holds this pair's map entry, which is what serializes same-pair
/// requests.
#[derive(Debug, Clone)]
pub struct PairSession {
    pub phase: Phase,
}

impl Default for PairSession {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl PairSession {
    /// The pending record, when a prediction is awaiting its verdict.
    pub fn pending(&self) -> Option<&PredictionRecord> {
        match &self.phase {
            Phase::Issued(record) => Some(record),
            _ => None,
        }
    }

    /// Remove and return the pending record, leaving the session idle.
    pub fn take_pending(&mut self) -> Option<PredictionRecord> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Issued(record) => Some(record),
            other => {
                self.phase = other;
                None
            }
        }
    }
}
