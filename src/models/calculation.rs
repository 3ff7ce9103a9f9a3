use serde::{Deserialize, Serialize};

use crate::calculator::calculations::numeric_prefix;
use crate::calculator::{parse_field, parse_number, SOLVED_DECIMALS};

/// One of the three calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedField {
    Volume,
    Hours,
    Rate,
}

impl FeedField {
    /// Unit suffix shown after a solved value.
    pub fn unit(self) -> &'static str {
        match self {
            FeedField::Volume => "mL",
            FeedField::Hours => "hours",
            FeedField::Rate => "mL/hour",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedField::Volume => "Total milliliters",
            FeedField::Hours => "Total hours",
            FeedField::Rate => "Feed rate",
        }
    }
}

/// Which quantity a calculation solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    FeedRate,
    TotalVolume,
    TotalHours,
}

impl CalculationKind {
    /// The field this kind fills in.
    pub fn solved_field(self) -> FeedField {
        match self {
            CalculationKind::FeedRate => FeedField::Rate,
            CalculationKind::TotalVolume => FeedField::Volume,
            CalculationKind::TotalHours => FeedField::Hours,
        }
    }

    /// Wire name, as stored in the usage log.
    pub fn as_str(self) -> &'static str {
        match self {
            CalculationKind::FeedRate => "feed_rate",
            CalculationKind::TotalVolume => "total_volume",
            CalculationKind::TotalHours => "total_hours",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CalculationKind::FeedRate => "Feed Rate",
            CalculationKind::TotalVolume => "Total Volume",
            CalculationKind::TotalHours => "Total Hours",
        }
    }
}

impl std::fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculator inputs; `None` means the field was left blank or was unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalculationInput {
    pub volume_ml: Option<f64>,
    pub duration_hours: Option<f64>,
    pub rate_ml_per_hour: Option<f64>,
}

impl CalculationInput {
    pub fn new(
        volume_ml: Option<f64>,
        duration_hours: Option<f64>,
        rate_ml_per_hour: Option<f64>,
    ) -> Self {
        Self {
            volume_ml,
            duration_hours,
            rate_ml_per_hour,
        }
    }

    /// Build from raw field strings. Unparseable or zero values become `None`;
    /// negative values are kept here and dropped by [`usable`](Self::usable).
    pub fn from_raw(volume: &str, hours: &str, rate: &str) -> Self {
        Self {
            volume_ml: parse_number(volume),
            duration_hours: parse_number(hours),
            rate_ml_per_hour: parse_number(rate),
        }
    }

    /// Drop values that are not finite and strictly positive.
    pub fn usable(self) -> Self {
        let keep = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        Self {
            volume_ml: keep(self.volume_ml),
            duration_hours: keep(self.duration_hours),
            rate_ml_per_hour: keep(self.rate_ml_per_hour),
        }
    }

    /// Number of usable fields.
    pub fn usable_count(&self) -> usize {
        let usable = self.usable();
        [
            usable.volume_ml,
            usable.duration_hours,
            usable.rate_ml_per_hour,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Calorie and protein totals for an attached formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub total_calories: f64,
    pub daily_calories: Option<f64>,
    pub total_protein_grams: f64,
}

/// Outcome of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub kind: CalculationKind,
    pub volume_ml: f64,
    pub duration_hours: f64,
    pub rate_ml_per_hour: f64,
    /// Absent when no formula was attached; never zero-filled.
    pub nutrition: Option<Nutrition>,
}

impl CalculationResult {
    pub fn value(&self, field: FeedField) -> f64 {
        match field {
            FeedField::Volume => self.volume_ml,
            FeedField::Hours => self.duration_hours,
            FeedField::Rate => self.rate_ml_per_hour,
        }
    }

    /// The value that was solved for, at full precision.
    pub fn solved_value(&self) -> f64 {
        self.value(self.kind.solved_field())
    }

    /// Display string for a field.
    ///
    /// The solved field is shown with exactly two decimals; entered fields keep their precision.
    pub fn display(&self, field: FeedField) -> String {
        let value = self.value(field);
        if field == self.kind.solved_field() {
            format!("{:.*}", SOLVED_DECIMALS, value)
        } else {
            format!("{}", value)
        }
    }

    /// Display string for a field as the user typed it.
    ///
    /// Entered fields keep their typed precision (`"1000.50"` stays
    /// `"1000.50"`); the solved field, or text that does not read back as the
    /// field's value, falls back to [`display`](Self::display).
    pub fn display_entered(&self, field: FeedField, entered: &str) -> String {
        if field == self.kind.solved_field() {
            return self.display(field);
        }
        let typed = numeric_prefix(entered.trim_start());
        if parse_field(typed) == Some(self.value(field)) {
            typed.to_string()
        } else {
            self.display(field)
        }
    }

    /// Display string for the solved field with its unit, e.g. `125.00 mL/hour`.
    pub fn solved_display(&self) -> String {
        let field = self.kind.solved_field();
        format!("{} {}", self.display(field), field.unit())
    }

    pub fn total_calories(&self) -> Option<f64> {
        self.nutrition.map(|n| n.total_calories)
    }

    pub fn daily_calories(&self) -> Option<f64> {
        self.nutrition.and_then(|n| n.daily_calories)
    }

    pub fn total_protein_grams(&self) -> Option<f64> {
        self.nutrition.map(|n| n.total_protein_grams)
    }
}
