/// Errors from the game catalog and pattern store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("unknown app: {0}")]
    UnknownApp(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("invalid sequence: {reason}")]
    InvalidSequence { reason: String },

    #[error("no pattern with that sequence")]
    NotFound,
}
