//! Jersey numbers, the identity key of an athlete within a roster.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building a jersey number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JerseyNumberError {
    #[error("Jersey number must be between {min} and {max}, got {0}", min = JerseyNumber::MIN, max = JerseyNumber::MAX)]
    OutOfRange(i64),

    #[error("Jersey number is not a positive integer: {0:?}")]
    NotANumber(String),
}

/// A validated jersey number in `1..=99`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct JerseyNumber(u8);

impl JerseyNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    /// Create a jersey number, rejecting values outside `1..=99`.
    pub fn new(value: i64) -> Result<Self, JerseyNumberError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(JerseyNumberError::OutOfRange(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for JerseyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for JerseyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JerseyNumber({})", self.0)
    }
}

impl TryFrom<i64> for JerseyNumber {
    type Error = JerseyNumberError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JerseyNumber> for u8 {
    fn from(number: JerseyNumber) -> Self {
        number.0
    }
}

impl FromStr for JerseyNumber {
    type Err = JerseyNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: i64 = s
            .parse()
            .map_err(|_| JerseyNumberError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}
