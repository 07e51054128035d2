//! Per-(user, game) cooldown gating.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use augur_core::models::PairKey;

/// Outcome of a cooldown check. `Wait` is control flow, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Issuance permitted; the timestamp was recorded.
    Ready,
    /// Still cooling down for this long. The stored timestamp is untouched,
    /// so repeated denied attempts never extend the wait.
    Wait(Duration),
}

/// Tracks the last-issued timestamp per pair.
#[derive(Debug, Default)]
pub struct CooldownManager {
    last_issued: DashMap<PairKey, DateTime<Utc>>,
}

impl CooldownManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically check the pair against `cooldown_secs` and, when permitted,
    /// record `now` as the new last-issued timestamp. A zero cooldown always
    /// permits but still records, so the audit trail stays complete.
    pub fn check_and_record(
        &self,
        key: &PairKey,
        cooldown_secs: u64,
        now: DateTime<Utc>,
    ) -> Gate {
        match self.last_issued.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(now);
                Gate::Ready
            }
            Entry::Occupied(mut entry) => {
                let cooldown = Duration::seconds(cooldown_secs as i64);
                let elapsed = now - *entry.get();
                if cooldown_secs == 0 || elapsed >= cooldown {
                    entry.insert(now);
                    Gate::Ready
                } else {
                    Gate::Wait(cooldown - elapsed)
                }
            }
        }
    }

    /// Administrative override: forget the pair's last-issued timestamp.
    pub fn reset(&self, key: &PairKey) -> bool {
        self.last_issued.remove(key).is_some()
    }

    /// Last-issued timestamp for a pair, if any.
    pub fn last_issued(&self, key: &PairKey) -> Option<DateTime<Utc>> {
        self.last_issued.get(key).map(|r| *r.value())
    }

    /// All recorded pairs, for snapshotting.
    pub fn pairs(&self) -> Vec<(PairKey, DateTime<Utc>)> {
        self.last_issued
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect()
    }

    /// Reinstate a timestamp from a snapshot.
    pub fn restore(&self, key: PairKey, at: DateTime<Utc>) {
        self.last_issued.insert(key, at);
    }
}
