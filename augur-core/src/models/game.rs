//! Games, their axis types, and admin-curated patterns.

use serde::{Deserialize, Serialize};

use super::label::{Label, Parity, Size};

/// Which label set a game draws its outcomes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// {Big, Small}
    Single,
    /// {Big, Small} × {Odd, Even}
    Dual,
}

impl Axis {
    /// Whether a label belongs to this axis type's label set.
    pub fn permits(&self, label: Label) -> bool {
        match self {
            Axis::Single => label.parity.is_none(),
            Axis::Dual => label.parity.is_some(),
        }
    }

    /// The full label set, in the order the transport layer presents it.
    pub fn labels(&self) -> Vec<Label> {
        match self {
            Axis::Single => vec![Label::single(Size::Big), Label::single(Size::Small)],
            Axis::Dual => vec![
                Label::dual(Size::Big, Parity::Odd),
                Label::dual(Size::Big, Parity::Even),
                Label::dual(Size::Small, Parity::Odd),
                Label::dual(Size::Small, Parity::Even),
            ],
        }
    }
}

/// An admin-defined rule mapping a recent-result sequence to a predicted
/// outcome. The sequence is matched against the history suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub sequence: Vec<Label>,
    pub outcome: Label,
}

/// One game in the catalog: axis type, cooldown, and its pattern set in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub axis: Axis,
    /// Seconds a user must wait between issued predictions. Zero disables
    /// gating.
    pub cooldown_secs: u64,
    pub patterns: Vec<Pattern>,
}

impl Game {
    pub fn new(name: impl Into<String>, axis: Axis, cooldown_secs: u64) -> Self {
        Self {
            name: name.into(),
            axis,
            cooldown_secs,
            patterns: Vec::new(),
        }
    }
}
