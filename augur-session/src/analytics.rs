//! Per-user prediction archive and derived statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use augur_core::models::{ResolvedPrediction, Verdict};

/// Counts for one game inside a user's archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total: u64,
    pub correct: u64,
}

/// Archive of one user's resolved predictions, in resolution order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAnalytics {
    pub resolved: Vec<ResolvedPrediction>,
}

impl UserAnalytics {
    pub fn record(&mut self, row: ResolvedPrediction) {
        self.resolved.push(row);
    }

    pub fn total(&self) -> usize {
        self.resolved.len()
    }

    pub fn correct(&self) -> usize {
        self.resolved
            .iter()
            .filter(|r| r.verdict == Verdict::Correct)
            .count()
    }

    /// Fraction of resolved predictions confirmed correct; 0.0 when empty.
    pub fn hit_rate(&self) -> f64 {
        if self.resolved.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.total() as f64
    }

    /// Per-game totals and correct counts.
    pub fn per_game(&self) -> HashMap<String, GameStats> {
        let mut stats: HashMap<String, GameStats> = HashMap::new();
        for row in &self.resolved {
            let entry = stats.entry(row.game.clone()).or_default();
            entry.total += 1;
            if row.verdict == Verdict::Correct {
                entry.correct += 1;
            }
        }
        stats
    }

    /// The newest resolutions first.
    pub fn recent(&self, limit: usize) -> Vec<ResolvedPrediction> {
        self.resolved.iter().rev().take(limit).cloned().collect()
    }
}
