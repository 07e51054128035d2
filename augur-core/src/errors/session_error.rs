/// Errors from the prediction session state machine and its gates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no pending prediction with that id")]
    NotPending,

    #[error("the confirmation window for this prediction has elapsed")]
    Expired,

    #[error("a prediction is still awaiting confirmation for this pair")]
    PredictionPending,

    #[error("user has not joined the required channel")]
    NotMember,

    #[error("prediction quota exhausted")]
    QuotaExceeded,
}
