//! Closed vocabularies for scouting: fundamentals, outcome grades and marks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a symbol or name does not belong to a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVocabularyError {
    #[error("Unknown outcome symbol: {0:?} (expected one of # + - =)")]
    Outcome(String),

    #[error("Unknown mark symbol: {0:?} (expected one of # + - = M)")]
    Mark(String),

    #[error("Unknown fundamental: {0:?}")]
    Fundamental(String),
}

/// Qualitative grade of a single attempt at a fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "#")]
    Excellent,
    #[serde(rename = "+")]
    Good,
    #[serde(rename = "-")]
    Poor,
    #[serde(rename = "=")]
    Error,
}

impl Outcome {
    /// All grades in column order.
    pub const ALL: [Outcome; 4] = [
        Outcome::Excellent,
        Outcome::Good,
        Outcome::Poor,
        Outcome::Error,
    ];

    /// Scouting shorthand for the grade.
    pub fn symbol(&self) -> &'static str {
        match self {
            Outcome::Excellent => "#",
            Outcome::Good => "+",
            Outcome::Poor => "-",
            Outcome::Error => "=",
        }
    }

    /// Whether the grade counts towards positivity.
    pub fn is_positive(&self) -> bool {
        matches!(self, Outcome::Excellent | Outcome::Good)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Outcome {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "#" => Ok(Outcome::Excellent),
            "+" => Ok(Outcome::Good),
            "-" => Ok(Outcome::Poor),
            "=" => Ok(Outcome::Error),
            other => Err(ParseVocabularyError::Outcome(other.to_string())),
        }
    }
}

/// Any raw counter a scouting event can target.
///
/// `Blocked` only exists on the attack fundamental: an attack stopped by the
/// opposing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "#")]
    Excellent,
    #[serde(rename = "+")]
    Good,
    #[serde(rename = "-")]
    Poor,
    #[serde(rename = "=")]
    Error,
    #[serde(rename = "M")]
    Blocked,
}

impl Mark {
    /// The generic grade behind this mark, if it is one.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Mark::Excellent => Some(Outcome::Excellent),
            Mark::Good => Some(Outcome::Good),
            Mark::Poor => Some(Outcome::Poor),
            Mark::Error => Some(Outcome::Error),
            Mark::Blocked => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self.outcome() {
            Some(outcome) => outcome.symbol(),
            None => "M",
        }
    }
}

impl From<Outcome> for Mark {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Excellent => Mark::Excellent,
            Outcome::Good => Mark::Good,
            Outcome::Poor => Mark::Poor,
            Outcome::Error => Mark::Error,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Mark {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("m") {
            return Ok(Mark::Blocked);
        }
        s.parse::<Outcome>()
            .map(Mark::from)
            .map_err(|_| ParseVocabularyError::Mark(s.to_string()))
    }
}

/// One of the four technical skills tracked per athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fundamental {
    Service,
    Reception,
    Attack,
    Defense,
}

impl Fundamental {
    /// All fundamentals in report order.
    pub const ALL: [Fundamental; 4] = [
        Fundamental::Service,
        Fundamental::Reception,
        Fundamental::Attack,
        Fundamental::Defense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fundamental::Service => "service",
            Fundamental::Reception => "reception",
            Fundamental::Attack => "attack",
            Fundamental::Defense => "defense",
        }
    }

    /// Whether the fundamental tracks blocked attempts.
    pub fn tracks_blocked(&self) -> bool {
        matches!(self, Fundamental::Attack)
    }
}

impl fmt::Display for Fundamental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fundamental {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "service" | "serve" => Ok(Fundamental::Service),
            "reception" => Ok(Fundamental::Reception),
            "attack" => Ok(Fundamental::Attack),
            "defense" | "defence" => Ok(Fundamental::Defense),
            _ => Err(ParseVocabularyError::Fundamental(s.to_string())),
        }
    }
}

/// Whether a scouting event adds or removes a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Increment,
    Decrement,
}
