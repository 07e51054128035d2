//! Error taxonomy, one enum per domain, aggregated into [`AugurError`].
//!
//! Everything here is recoverable and reported to the requester or admin
//! verbatim; nothing in the core is fatal to the process. A cooldown denial
//! is a control-flow result, not an error, and lives with the cooldown
//! manager instead.

mod catalog_error;
mod config_error;
mod history_error;
mod match_error;
mod session_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use history_error::HistoryError;
pub use match_error::MatchError;
pub use session_error::SessionError;

/// Any domain error the engine can surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AugurError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Convenience alias used across the workspace.
pub type AugurResult<T> = Result<T, AugurError>;
