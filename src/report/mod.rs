//! Statistical report assembly and rendering.
//!
//! A [`Report`] is a snapshot of every player row plus one team-total row,
//! with percentages rounded for display and classified into colour bands.
//! It can be rendered as a text table, a printable HTML document, JSON or
//! JSON Lines.

mod band;
mod html;
mod labels;
mod text;

pub use band::*;
pub use labels::*;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::calculate::round_percentage;
use crate::models::{Fundamental, FundamentalStat, JerseyNumber, PlayerStats, TeamStats};

/// Report rendering errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown report format: {0:?} (expected text, html, json or jsonl)")]
    UnknownFormat(String),
}

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
    Json,
    Jsonl,
}

impl ReportFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Text => "text",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Jsonl => "jsonl",
        })
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "jsonl" => Ok(ReportFormat::Jsonl),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Display fields of one fundamental in one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundamentalRow {
    pub fundamental: Fundamental,
    pub excellent: u32,
    pub good: u32,
    pub poor: u32,
    pub error: u32,
    /// Attack only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<u32>,
    pub total_attempts: u32,
    pub points: u32,
    /// Includes blocked attempts for attack
    pub errors: u32,
    /// Rounded to the nearest integer
    pub efficiency: i32,
    /// Rounded to the nearest integer
    pub positivity: i32,
    pub efficiency_band: EfficiencyBand,
    pub positivity_band: PositivityBand,
}

impl From<&FundamentalStat> for FundamentalRow {
    fn from(stat: &FundamentalStat) -> Self {
        let counters = stat.counters();
        let efficiency = round_percentage(stat.efficiency());
        let positivity = round_percentage(stat.positivity());

        Self {
            fundamental: stat.kind(),
            excellent: counters.excellent,
            good: counters.good,
            poor: counters.poor,
            error: counters.error,
            blocked: stat.kind().tracks_blocked().then_some(counters.blocked),
            total_attempts: stat.total_attempts(),
            points: stat.points(),
            errors: stat.errors(),
            efficiency,
            positivity,
            efficiency_band: EfficiencyBand::from_percentage(efficiency),
            positivity_band: PositivityBand::from_percentage(positivity),
        }
    }
}

/// Who a row describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowSubject {
    Player {
        jersey_number: JerseyNumber,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        surname: Option<String>,
    },
    Team,
}

/// One report line: a player or the team total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub subject: RowSubject,
    /// In report order: service, reception, attack, defense
    pub fundamentals: Vec<FundamentalRow>,
}

impl ReportRow {
    fn player(stats: &PlayerStats) -> Self {
        let athlete = stats.athlete();
        Self {
            subject: RowSubject::Player {
                jersey_number: athlete.jersey_number(),
                name: athlete.name().to_string(),
                surname: athlete.surname().map(str::to_string),
            },
            fundamentals: stats.iter().map(FundamentalRow::from).collect(),
        }
    }

    fn team(stats: &TeamStats) -> Self {
        Self {
            subject: RowSubject::Team,
            fundamentals: stats.iter().map(FundamentalRow::from).collect(),
        }
    }

    pub fn fundamental(&self, fundamental: Fundamental) -> Option<&FundamentalRow> {
        self.fundamentals.iter().find(|f| f.fundamental == fundamental)
    }
}

/// Statistical report for one match.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub match_name: String,
    pub generated_at: DateTime<Utc>,
    pub language: Language,
    pub players: Vec<ReportRow>,
    pub team: ReportRow,
}

impl Report {
    /// Build a report from the players' current stats.
    pub fn build(match_name: &str, players: &[PlayerStats], language: Language) -> Self {
        let team = TeamStats::aggregate(players);
        Self {
            match_name: match_name.trim().to_string(),
            generated_at: Utc::now(),
            language,
            players: players.iter().map(ReportRow::player).collect(),
            team: ReportRow::team(&team),
        }
    }

    /// True when there are no players to report on.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player rows followed by the team row.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.players.iter().chain(std::iter::once(&self.team))
    }

    /// Heading line, e.g. `Statistical Report for "Finals"`.
    pub fn heading(&self) -> String {
        let labels = self.language.labels();
        if self.match_name.is_empty() {
            labels.title.to_string()
        } else {
            format!("{} {} \"{}\"", labels.title, labels.for_match, self.match_name)
        }
    }

    /// Suggested export file name, from the match name.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .match_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        if stem.trim_matches('_').is_empty() {
            "volleyball_scout_report".to_string()
        } else {
            stem
        }
    }

    pub fn to_text(&self) -> String {
        text::render(self)
    }

    pub fn to_html(&self) -> String {
        html::render(self)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        Ok(match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Html => self.to_html(),
            ReportFormat::Json => serde_json::to_string_pretty(self)?,
            ReportFormat::Jsonl => {
                let mut out = String::new();
                for row in self.rows() {
                    out.push_str(&serde_json::to_string(row)?);
                    out.push('\n');
                }
                out
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Athlete, Direction, Mark, RawCounters};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn player(n: i64, name: &str, surname: Option<&str>) -> PlayerStats {
        let athlete = Athlete::new(
            JerseyNumber::new(n).unwrap(),
            name,
            surname.map(str::to_string),
        )
        .unwrap();
        PlayerStats::new(Arc::new(athlete))
    }

    fn sample_players() -> Vec<PlayerStats> {
        let mut first = player(7, "Paola", Some("Egonu"));
        first.replace_counters(
            Fundamental::Service,
            RawCounters {
                excellent: 3,
                good: 2,
                poor: 1,
                error: 2,
                blocked: 0,
            },
        );
        first.replace_counters(
            Fundamental::Attack,
            RawCounters {
                excellent: 2,
                good: 1,
                poor: 0,
                error: 1,
                blocked: 1,
            },
        );

        let mut second = player(10, "Monica", None);
        second
            .fundamental_mut(Fundamental::Reception)
            .apply(Mark::Error, Direction::Increment);

        vec![first, second]
    }

    #[test]
    fn test_fundamental_row_rounds_and_bands() {
        let players = sample_players();
        let row = FundamentalRow::from(players[0].fundamental(Fundamental::Service));

        assert_eq!(row.total_attempts, 8);
        assert_eq!(row.efficiency, 13);
        assert_eq!(row.positivity, 63);
        assert_eq!(row.efficiency_band, EfficiencyBand::Positive);
        assert_eq!(row.positivity_band, PositivityBand::Good);
        assert_eq!(row.blocked, None);
    }

    #[test]
    fn test_attack_row_exposes_blocked() {
        let players = sample_players();
        let row = FundamentalRow::from(players[0].fundamental(Fundamental::Attack));

        assert_eq!(row.blocked, Some(1));
        assert_eq!(row.errors, 2);
        assert_eq!(row.efficiency, 0);
        assert_eq!(row.efficiency_band, EfficiencyBand::Neutral);
        assert_eq!(row.positivity, 60);
    }

    #[test]
    fn test_report_build() {
        let report = Report::build(" Final ", &sample_players(), Language::En);

        assert_eq!(report.match_name, "Final");
        assert_eq!(report.players.len(), 2);
        assert_eq!(report.rows().count(), 3);
        assert_eq!(report.team.subject, RowSubject::Team);
        assert_eq!(report.players[0].fundamentals.len(), 4);

        let reception = report.team.fundamental(Fundamental::Reception).unwrap();
        assert_eq!(reception.total_attempts, 1);
        assert_eq!(reception.efficiency, -100);
        assert_eq!(reception.efficiency_band, EfficiencyBand::VeryNegative);
        assert_eq!(reception.positivity_band, PositivityBand::None);
    }

    #[test]
    fn test_report_empty() {
        let report = Report::build("Nobody", &[], Language::It);

        assert!(report.is_empty());
        for row in &report.team.fundamentals {
            assert_eq!(row.total_attempts, 0);
            assert_eq!(row.efficiency, 0);
            assert_eq!(row.positivity, 0);
        }
    }

    #[test]
    fn test_report_heading() {
        let report = Report::build("Final", &[], Language::En);
        assert_eq!(report.heading(), "Statistical Report for \"Final\"");

        let untitled = Report::build("", &[], Language::It);
        assert_eq!(untitled.heading(), "Report statistico");
    }

    #[test]
    fn test_report_file_stem() {
        let report = Report::build("Conegliano vs Milano", &[], Language::En);
        assert_eq!(report.file_stem(), "Conegliano_vs_Milano");

        let untitled = Report::build("  ", &[], Language::En);
        assert_eq!(untitled.file_stem(), "volleyball_scout_report");
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!("HTML".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!("txt".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Jsonl.extension(), "jsonl");
    }

    #[test]
    fn test_render_json() {
        let report = Report::build("Final", &sample_players(), Language::En);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();

        assert_eq!(json["language"], "en");
        assert_eq!(json["players"][0]["subject"]["kind"], "player");
        assert_eq!(json["players"][0]["subject"]["jersey_number"], 7);
        assert_eq!(json["team"]["subject"]["kind"], "team");
        assert_eq!(json["players"][0]["fundamentals"][2]["blocked"], 1);
        assert!(json["players"][0]["fundamentals"][0].get("blocked").is_none());
    }

    #[test]
    fn test_render_jsonl_one_row_per_line() {
        let report = Report::build("Final", &sample_players(), Language::En);
        let rendered = report.render(ReportFormat::Jsonl).unwrap();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["subject"]["kind"], "team");
    }
}
