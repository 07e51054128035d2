use crate::models::EngineSnapshot;

use super::BoxError;

/// Key-value persistence collaborator. The engine hands over a serde-friendly
/// snapshot; the implementation decides the medium and the schema.
pub trait SnapshotStore: Send + Sync {
    /// `None` when nothing was ever stored.
    fn load(&self) -> Result<Option<EngineSnapshot>, BoxError>;

    fn store(&self, snapshot: &EngineSnapshot) -> Result<(), BoxError>;
}
