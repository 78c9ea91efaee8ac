//! Colour bands for the percentage columns.

use serde::{Deserialize, Serialize};

/// Positivity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositivityBand {
    /// 75% and above
    Excellent,
    /// 50% to 74%
    Good,
    /// Above 0% and below 50%
    Fair,
    /// Exactly 0%
    None,
}

impl PositivityBand {
    /// Classify a positivity percentage.
    pub fn from_percentage(value: i32) -> Self {
        if value >= 75 {
            PositivityBand::Excellent
        } else if value >= 50 {
            PositivityBand::Good
        } else if value > 0 {
            PositivityBand::Fair
        } else {
            PositivityBand::None
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PositivityBand::Excellent => "band-excellent",
            PositivityBand::Good => "band-good",
            PositivityBand::Fair => "band-fair",
            PositivityBand::None => "band-none",
        }
    }
}

/// Efficiency classification. Efficiency may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyBand {
    /// 75% and above
    Excellent,
    /// 50% to 74%
    Good,
    /// Above 0% and below 50%
    Positive,
    /// Exactly 0%
    Neutral,
    /// Below 0% and above -50%
    Negative,
    /// -50% and below
    VeryNegative,
}

impl EfficiencyBand {
    /// Classify an efficiency percentage.
    pub fn from_percentage(value: i32) -> Self {
        if value >= 75 {
            EfficiencyBand::Excellent
        } else if value >= 50 {
            EfficiencyBand::Good
        } else if value > 0 {
            EfficiencyBand::Positive
        } else if value == 0 {
            EfficiencyBand::Neutral
        } else if value <= -50 {
            EfficiencyBand::VeryNegative
        } else {
            EfficiencyBand::Negative
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            EfficiencyBand::Excellent => "band-excellent",
            EfficiencyBand::Good => "band-good",
            EfficiencyBand::Positive => "band-fair",
            EfficiencyBand::Neutral => "band-none",
            EfficiencyBand::Negative => "band-negative",
            EfficiencyBand::VeryNegative => "band-very-negative",
        }
    }
}
