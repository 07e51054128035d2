//! Suffix matching of admin patterns against a result history.
//!
//! A pattern of length L matches iff it equals the last L history elements.
//! Outcomes are tallied across all matching patterns; ties break on longest
//! matching sequence, then on most recently added pattern. Deterministic and
//! stateless.

use augur_core::errors::MatchError;
use augur_core::models::{Label, Pattern};

/// The matcher's choice, with the number of patterns that voted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub outcome: Label,
    pub match_count: usize,
}

struct Tally {
    outcome: Label,
    count: usize,
    /// Longest matching sequence that produced this outcome.
    longest: usize,
    /// Insertion index of the newest matching pattern for this outcome.
    newest: usize,
}

/// Pick the most frequent outcome among patterns matching the history suffix.
pub fn predict(history: &[Label], patterns: &[Pattern]) -> Result<Match, MatchError> {
    let mut tallies: Vec<Tally> = Vec::new();

    for (idx, pattern) in patterns.iter().enumerate() {
        let len = pattern.sequence.len();
        if len == 0 || len > history.len() {
            continue;
        }
        if history[history.len() - len..] != pattern.sequence[..] {
            continue;
        }

        match tallies.iter_mut().find(|t| t.outcome == pattern.outcome) {
            Some(t) => {
                t.count += 1;
                t.longest = t.longest.max(len);
                t.newest = idx;
            }
            None => tallies.push(Tally {
                outcome: pattern.outcome,
                count: 1,
                longest: len,
                newest: idx,
            }),
        }
    }

    tallies
        .into_iter()
        .max_by_key(|t| (t.count, t.longest, t.newest))
        .map(|t| Match {
            outcome: t.outcome,
            match_count: t.count,
        })
        .ok_or(MatchError::NoMatch)
}
