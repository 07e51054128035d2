//! Result labels: the discrete outcome values a game round can take.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Size axis of a round outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Big,
    Small,
}

/// Parity axis of a round outcome, present only for dual-axis games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Odd,
    Even,
}

/// One observed or predicted round outcome.
///
/// Single-axis games use the size alone ("Big"); dual-axis games combine
/// size and parity ("Big Odd"). Serde round-trips through the chat-facing
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    pub size: Size,
    pub parity: Option<Parity>,
}

impl Label {
    /// A single-axis label.
    pub fn single(size: Size) -> Self {
        Self { size, parity: None }
    }

    /// A dual-axis label.
    pub fn dual(size: Size, parity: Parity) -> Self {
        Self {
            size,
            parity: Some(parity),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = match self.size {
            Size::Big => "Big",
            Size::Small => "Small",
        };
        match self.parity {
            None => f.write_str(size),
            Some(Parity::Odd) => write!(f, "{size} Odd"),
            Some(Parity::Even) => write!(f, "{size} Even"),
        }
    }
}

/// Error returned when a label string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized result label: {0:?}")]
pub struct ParseLabelError(pub String);

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let size = match words.next() {
            Some("Big") => Size::Big,
            Some("Small") => Size::Small,
            _ => return Err(ParseLabelError(s.to_string())),
        };
        let parity = match words.next() {
            None => None,
            Some("Odd") => Some(Parity::Odd),
            Some("Even") => Some(Parity::Even),
            _ => return Err(ParseLabelError(s.to_string())),
        };
        if words.next().is_some() {
            return Err(ParseLabelError(s.to_string()));
        }
        Ok(Label { size, parity })
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
