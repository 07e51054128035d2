/// Errors from the rolling result-history tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("history seed must hold exactly {expected} labels, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("history already seeded for this pair")]
    AlreadySeeded,

    #[error("no history seeded for this pair")]
    NotSeeded,
}
