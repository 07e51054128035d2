//! Rolling last-N result window per (user, game) pair.
//!
//! A history is seeded once with exactly [`HISTORY_LEN`] labels and from then
//! on only advances through `append_evict`, so its length never changes.

use std::collections::VecDeque;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use augur_core::constants::HISTORY_LEN;
use augur_core::errors::HistoryError;
use augur_core::models::{Label, PairKey};

/// Thread-safe history store, one window per pair.
#[derive(Debug, Default)]
pub struct HistoryTracker {
    histories: DashMap<PairKey, VecDeque<Label>>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time initialization with exactly [`HISTORY_LEN`] labels,
    /// oldest first.
    pub fn seed(&self, key: PairKey, labels: Vec<Label>) -> Result<(), HistoryError> {
        if labels.len() != HISTORY_LEN {
            return Err(HistoryError::InvalidLength {
                expected: HISTORY_LEN,
                got: labels.len(),
            });
        }
        match self.histories.entry(key) {
            Entry::Occupied(_) => Err(HistoryError::AlreadySeeded),
            Entry::Vacant(slot) => {
                slot.insert(labels.into_iter().collect());
                Ok(())
            }
        }
    }

    /// Drop the oldest label, append the newest. Returns the updated window.
    pub fn append_evict(&self, key: &PairKey, label: Label) -> Result<Vec<Label>, HistoryError> {
        let mut history = self
            .histories
            .get_mut(key)
            .ok_or(HistoryError::NotSeeded)?;
        history.pop_front();
        history.push_back(label);
        Ok(history.iter().copied().collect())
    }

    /// The current window, oldest first.
    pub fn get(&self, key: &PairKey) -> Result<Vec<Label>, HistoryError> {
        self.histories
            .get(key)
            .map(|h| h.iter().copied().collect())
            .ok_or(HistoryError::NotSeeded)
    }

    /// Administrative clear, allowing a fresh seed. Returns whether a
    /// history existed.
    pub fn reset(&self, key: &PairKey) -> bool {
        self.histories.remove(key).is_some()
    }

    /// All seeded pairs with their windows, for snapshotting.
    pub fn pairs(&self) -> Vec<(PairKey, Vec<Label>)> {
        self.histories
            .iter()
            .map(|r| (r.key().clone(), r.value().iter().copied().collect()))
            .collect()
    }

    /// Reinstate a window from a snapshot. Same length rule as `seed`, but
    /// overwrites whatever is present.
    pub fn restore(&self, key: PairKey, labels: Vec<Label>) -> Result<(), HistoryError> {
        if labels.len() != HISTORY_LEN {
            return Err(HistoryError::InvalidLength {
                expected: HISTORY_LEN,
                got: labels.len(),
            });
        }
        self.histories.insert(key, labels.into_iter().collect());
        Ok(())
    }
}
