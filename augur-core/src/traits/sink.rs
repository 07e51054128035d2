use crate::models::LogRecord;

use super::BoxError;

/// External log channel for resolved predictions. Delivery is best-effort:
/// a failing sink never rolls back the history mutation it follows.
pub trait PredictionSink: Send + Sync {
    fn emit(&self, record: &LogRecord) -> Result<(), BoxError>;
}
