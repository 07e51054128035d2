//! Collaborator interfaces. The transport, billing, and persistence layers
//! implement these; the core only calls them at its boundary, never while
//! holding a lock.

mod gates;
mod sink;
mod store;

pub use gates::{MembershipGate, QuotaGate};
pub use sink::PredictionSink;
pub use store::SnapshotStore;

/// Boundary error type. Collaborator failures are foreign to the core's
/// taxonomy and are either surfaced verbatim or logged and dropped.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
