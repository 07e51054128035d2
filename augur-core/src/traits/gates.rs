use chrono::{DateTime, Utc};

use crate::models::UserId;

/// Forced-channel-membership check, answered by the chat transport.
pub trait MembershipGate: Send + Sync {
    fn is_member(&self, user: UserId) -> bool;
}

/// Plan/quota accounting, answered by the billing collaborator. Independent
/// of the per-game cooldown.
pub trait QuotaGate: Send + Sync {
    fn may_predict(&self, user: UserId, now: DateTime<Utc>) -> bool;
}
