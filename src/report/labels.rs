//! Report languages and their labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Fundamental;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language: {0:?} (expected \"it\" or \"en\")")]
pub struct UnknownLanguage(pub String);

/// Language used for report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    It,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::It => &ITALIAN,
            Language::En => &ENGLISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" | "ita" | "italiano" | "italian" => Ok(Language::It),
            "en" | "eng" | "english" => Ok(Language::En),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Fixed strings used by the renderers.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub for_match: &'static str,
    pub generated: &'static str,
    pub no_data: &'static str,
    pub number: &'static str,
    pub name: &'static str,
    pub surname: &'static str,
    pub team_total: &'static str,
    pub total: &'static str,
    pub points: &'static str,
    pub errors: &'static str,
    pub positivity: &'static str,
    pub efficiency: &'static str,
    service: &'static str,
    reception: &'static str,
    attack: &'static str,
    defense: &'static str,
}

impl Labels {
    pub fn fundamental(&self, fundamental: Fundamental) -> &'static str {
        match fundamental {
            Fundamental::Service => self.service,
            Fundamental::Reception => self.reception,
            Fundamental::Attack => self.attack,
            Fundamental::Defense => self.defense,
        }
    }
}

static ITALIAN: Labels = Labels {
    title: "Report statistico",
    for_match: "per",
    generated: "Generato il",
    no_data: "Nessun dato di scouting disponibile per generare il report.",
    number: "N°",
    name: "Nome",
    surname: "Cognome",
    team_total: "DI SQUADRA",
    total: "TOT",
    points: "Pti",
    errors: "Err",
    positivity: "Pos%",
    efficiency: "Eff%",
    service: "Battuta",
    reception: "Ricezione",
    attack: "Attacco",
    defense: "Difesa",
};

static ENGLISH: Labels = Labels {
    title: "Statistical Report",
    for_match: "for",
    generated: "Generated",
    no_data: "No scouting data available to generate report.",
    number: "#",
    name: "Name",
    surname: "Surname",
    team_total: "TEAM TOTAL",
    total: "TOT",
    points: "Pts",
    errors: "Err",
    positivity: "Pos%",
    efficiency: "Eff%",
    service: "Service",
    reception: "Reception",
    attack: "Attack",
    defense: "Defense",
};
