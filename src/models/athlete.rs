//! Athlete records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::JerseyNumber;

/// Errors raised when registering an athlete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AthleteError {
    #[error("Athlete #{0} has no name")]
    MissingName(JerseyNumber),
}

/// Unvalidated athlete fields, as submitted by a form or an import.
#[derive(Debug, Clone, Deserialize)]
pub struct AthleteRecord {
    pub jersey_number: JerseyNumber,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
}

/// A registered athlete. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AthleteRecord")]
pub struct Athlete {
    /// Identity key within a roster
    jersey_number: JerseyNumber,

    /// Given name
    name: String,

    /// Family name, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    surname: Option<String>,
}

impl Athlete {
    /// Create an athlete. Name and surname are trimmed; an empty surname is
    /// treated as absent.
    pub fn new(
        jersey_number: JerseyNumber,
        name: impl Into<String>,
        surname: Option<String>,
    ) -> Result<Self, AthleteError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AthleteError::MissingName(jersey_number));
        }

        let surname = surname
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            jersey_number,
            name,
            surname,
        })
    }

    pub fn jersey_number(&self) -> JerseyNumber {
        self.jersey_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    /// Name followed by surname, when present.
    pub fn display_name(&self) -> String {
        match &self.surname {
            Some(surname) => format!("{} {}", self.name, surname),
            None => self.name.clone(),
        }
    }
}

impl TryFrom<AthleteRecord> for Athlete {
    type Error = AthleteError;

    fn try_from(record: AthleteRecord) -> Result<Self, Self::Error> {
        Athlete::new(record.jersey_number, record.name, record.surname)
    }
}
