//! Athlete roster and roster file import.
//!
//! A roster file lists one athlete per line:
//!
//! ```text
//! number,name,surname
//! 7,Paola,Egonu
//! 10;Monica
//! 14	Anna	Danesi
//! ```
//!
//! Comma, semicolon and tab are accepted as separators. Invalid lines are
//! reported individually and never abort the rest of the import.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Athlete, AthleteError, JerseyNumber, JerseyNumberError};

/// Why a roster entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterErrorKind {
    #[error("expected `number,name[,surname]`")]
    Malformed,

    #[error("{0}")]
    InvalidNumber(#[from] JerseyNumberError),

    #[error("name is missing")]
    MissingName,

    #[error("jersey number {0} is already registered")]
    DuplicateNumber(JerseyNumber),
}

impl From<AthleteError> for RosterErrorKind {
    fn from(err: AthleteError) -> Self {
        match err {
            AthleteError::MissingName(_) => RosterErrorKind::MissingName,
        }
    }
}

/// A rejected line of a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct RosterLineError {
    /// 1-based line number
    pub line: usize,
    pub kind: RosterErrorKind,
}

impl Serialize for RosterLineError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("RosterLineError", 2)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("message", &self.kind.to_string())?;
        state.end()
    }
}

/// A valid roster line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub line: usize,
    pub athlete: Athlete,
}

/// Outcome of parsing a roster file.
#[derive(Debug, Clone, Default)]
pub struct RosterImport {
    /// Valid entries, in file order
    pub entries: Vec<RosterEntry>,
    pub errors: Vec<RosterLineError>,
}

impl RosterImport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn athletes(&self) -> impl Iterator<Item = &Athlete> {
        self.entries.iter().map(|e| &e.athlete)
    }
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<number>[^,;\t]*?)\s*[,;\t]\s*(?P<name>[^,;\t]*?)\s*(?:[,;\t]\s*(?P<surname>[^,;\t]*?)\s*)?$",
        )
        .unwrap()
    })
}

fn is_header(number_field: &str) -> bool {
    matches!(
        number_field.to_ascii_lowercase().as_str(),
        "number" | "numero" | "jersey" | "#"
    )
}

/// Parse a roster file.
///
/// Duplicate numbers are detected within the file; checking against an
/// existing roster is [`Roster::import`]'s job.
pub fn parse_roster(text: &str) -> RosterImport {
    let mut import = RosterImport::default();
    let mut seen = HashSet::new();
    let mut first_entry = true;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        let Some(caps) = line_pattern().captures(trimmed) else {
            first_entry = false;
            import.errors.push(RosterLineError {
                line,
                kind: RosterErrorKind::Malformed,
            });
            continue;
        };

        let number_field = &caps["number"];
        if std::mem::take(&mut first_entry) && is_header(number_field) {
            debug!("Skipping roster header on line {}", line);
            continue;
        }

        let surname = caps.name("surname").map(|m| m.as_str());
        match parse_entry(number_field, &caps["name"], surname) {
            Ok(athlete) if !seen.insert(athlete.jersey_number()) => {
                import.errors.push(RosterLineError {
                    line,
                    kind: RosterErrorKind::DuplicateNumber(athlete.jersey_number()),
                });
            }
            Ok(athlete) => import.entries.push(RosterEntry { line, athlete }),
            Err(kind) => import.errors.push(RosterLineError { line, kind }),
        }
    }

    for err in &import.errors {
        warn!("Rejected roster {}", err);
    }

    import
}

fn parse_entry(
    number: &str,
    name: &str,
    surname: Option<&str>,
) -> Result<Athlete, RosterErrorKind> {
    let jersey_number: JerseyNumber = number.parse()?;
    let athlete = Athlete::new(jersey_number, name, surname.map(str::to_string))?;
    Ok(athlete)
}

/// Registered athletes in registration order, unique by jersey number.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    athletes: Vec<Arc<Athlete>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an athlete. Fails if the jersey number is taken.
    pub fn add(&mut self, athlete: Athlete) -> Result<Arc<Athlete>, RosterErrorKind> {
        if self.contains(athlete.jersey_number()) {
            return Err(RosterErrorKind::DuplicateNumber(athlete.jersey_number()));
        }

        let athlete = Arc::new(athlete);
        self.athletes.push(Arc::clone(&athlete));
        Ok(athlete)
    }

    /// Parse a roster file and register every valid, unregistered athlete.
    ///
    /// Returns the athletes that were added and the rejected lines, sorted
    /// by line.
    pub fn import(&mut self, text: &str) -> (Vec<Arc<Athlete>>, Vec<RosterLineError>) {
        let parsed = parse_roster(text);
        let mut errors = parsed.errors;
        let mut added = Vec::new();

        for RosterEntry { line, athlete } in parsed.entries {
            match self.add(athlete) {
                Ok(athlete) => added.push(athlete),
                Err(kind) => {
                    warn!("Rejected roster line {}: {}", line, kind);
                    errors.push(RosterLineError { line, kind });
                }
            }
        }

        errors.sort_by_key(|e| e.line);
        info!(
            "Imported {} athletes ({} lines rejected)",
            added.len(),
            errors.len()
        );
        (added, errors)
    }

    /// Remove an athlete, returning it if present.
    pub fn remove(&mut self, number: JerseyNumber) -> Option<Arc<Athlete>> {
        let index = self
            .athletes
            .iter()
            .position(|a| a.jersey_number() == number)?;
        Some(self.athletes.remove(index))
    }

    pub fn get(&self, number: JerseyNumber) -> Option<&Arc<Athlete>> {
        self.athletes.iter().find(|a| a.jersey_number() == number)
    }

    pub fn contains(&self, number: JerseyNumber) -> bool {
        self.get(number).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Athlete>> {
        self.athletes.iter()
    }

    pub fn len(&self) -> usize {
        self.athletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.athletes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jersey(n: i64) -> JerseyNumber {
        JerseyNumber::new(n).unwrap()
    }

    #[test]
    fn test_parse_roster_separators() {
        let import = parse_roster("7,Paola,Egonu\n10;Monica\n14\tAnna\tDanesi\n");

        assert!(import.is_clean());
        let names: Vec<_> = import.athletes().map(|a| a.display_name()).collect();
        assert_eq!(names, vec!["Paola Egonu", "Monica", "Anna Danesi"]);
        assert_eq!(import.entries[2].line, 3);
        assert_eq!(import.entries[1].athlete.surname(), None);
    }

    #[test]
    fn test_parse_roster_skips_header_blank_and_comments() {
        let text = "Numero;Nome;Cognome\n\n// libero\n5;Monica;De Gennaro\n";
        let import = parse_roster(text);

        assert!(import.is_clean());
        assert_eq!(import.entries.len(), 1);
        assert_eq!(import.entries[0].line, 4);
        assert_eq!(import.entries[0].athlete.surname(), Some("De Gennaro"));
    }

    #[test]
    fn test_header_only_skipped_on_first_entry() {
        let import = parse_roster("7,Paola\nnumber,name\n");
        assert_eq!(import.entries.len(), 1);
        assert_eq!(import.errors.len(), 1);
        assert_eq!(import.errors[0].line, 2);
    }

    #[test]
    fn test_parse_roster_collects_line_errors() {
        let text = "\
7,Paola,Egonu
abc,Bad
0,Zero
12,
7,Again
just-a-name
9,Alessia,Orro";
        let import = parse_roster(text);

        let numbers: Vec<_> = import.athletes().map(|a| a.jersey_number()).collect();
        assert_eq!(numbers, vec![jersey(7), jersey(9)]);

        let lines: Vec<_> = import.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6]);

        assert!(matches!(
            import.errors[0].kind,
            RosterErrorKind::InvalidNumber(JerseyNumberError::NotANumber(_))
        ));
        assert!(matches!(
            import.errors[1].kind,
            RosterErrorKind::InvalidNumber(JerseyNumberError::OutOfRange(0))
        ));
        assert_eq!(import.errors[2].kind, RosterErrorKind::MissingName);
        assert_eq!(
            import.errors[3].kind,
            RosterErrorKind::DuplicateNumber(jersey(7))
        );
        assert_eq!(import.errors[4].kind, RosterErrorKind::Malformed);
    }

    #[test]
    fn test_line_error_message() {
        let err = RosterLineError {
            line: 3,
            kind: RosterErrorKind::MissingName,
        };
        assert_eq!(err.to_string(), "line 3: name is missing");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["message"], "name is missing");
    }

    #[test]
    fn test_roster_rejects_duplicate() {
        let mut roster = Roster::new();
        roster
            .add(Athlete::new(jersey(7), "Paola", None).unwrap())
            .unwrap();

        let result = roster.add(Athlete::new(jersey(7), "Someone", None).unwrap());
        assert_eq!(result, Err(RosterErrorKind::DuplicateNumber(jersey(7))));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(jersey(7)).unwrap().name(), "Paola");
    }

    #[test]
    fn test_roster_import_checks_existing_numbers() {
        let mut roster = Roster::new();
        roster
            .add(Athlete::new(jersey(7), "Paola", None).unwrap())
            .unwrap();

        let (added, errors) = roster.import("x,Bad\n7,Other\n11,Anna\n");

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].jersey_number(), jersey(11));
        assert_eq!(errors.iter().map(|e| e.line).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_roster_remove() {
        let mut roster = Roster::new();
        roster
            .add(Athlete::new(jersey(3), "Carlotta", None).unwrap())
            .unwrap();

        assert!(roster.remove(jersey(4)).is_none());
        assert_eq!(roster.remove(jersey(3)).unwrap().name(), "Carlotta");
        assert!(roster.is_empty());
    }
}
