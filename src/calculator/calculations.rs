use tracing::debug;

use crate::calculator::constants::*;
use crate::error::{FeedError, Result};
use crate::models::{CalculationInput, CalculationKind, CalculationResult, FormulaRecord, Nutrition};

/// Read the leading number of a raw field the way a browser `parseFloat`
/// does, keeping its sign.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so a
/// previously solved `"125.00 mL/hour"` reads back as 125. Blank, non-numeric,
/// zero and non-finite text yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let prefix = numeric_prefix(raw.trim_start());
    if prefix.is_empty() {
        return None;
    }
    prefix
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

/// Parse a raw field into a value the solver can use.
///
/// Like [`parse_number`], but negative values are also treated as absent.
pub fn parse_field(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}

/// Longest prefix of `s` that forms a decimal number with optional exponent.
pub(crate) fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts if at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Solve for the missing quantity of volume = rate × time.
///
/// Pairs are checked in a fixed order, so when all three fields are supplied
/// the feed rate is recomputed from volume and duration:
/// 1. volume & duration → rate (`feed_rate`)
/// 2. volume & rate → duration (`total_hours`)
/// 3. duration & rate → volume (`total_volume`)
///
/// Nutrition totals are derived only when a formula is attached.
pub fn solve(input: &CalculationInput, formula: Option<&FormulaRecord>) -> Result<CalculationResult> {
    let usable = input.usable();
    if usable.usable_count() < REQUIRED_FIELDS {
        debug!(?input, "not enough usable fields to solve");
        return Err(FeedError::InsufficientInput);
    }

    let (kind, volume, hours, rate) = match (
        usable.volume_ml,
        usable.duration_hours,
        usable.rate_ml_per_hour,
    ) {
        (Some(v), Some(d), _) => (CalculationKind::FeedRate, v, d, v / d),
        (Some(v), None, Some(r)) => (CalculationKind::TotalHours, v, v / r, r),
        (None, Some(d), Some(r)) => (CalculationKind::TotalVolume, r * d, d, r),
        _ => return Err(FeedError::InsufficientInput),
    };

    let nutrition = formula.map(|f| derive_nutrition(volume, Some(hours), Some(rate), f));

    debug!(%kind, volume, hours, rate, "solved feed calculation");

    Ok(CalculationResult {
        kind,
        volume_ml: volume,
        duration_hours: hours,
        rate_ml_per_hour: rate,
        nutrition,
    })
}

/// Derive calorie and protein totals for a feed volume.
///
/// Daily calories come from the duration when it is known, otherwise from the
/// rate via the daily volume. Both routes are kept because logged data was
/// produced by each of them.
pub fn derive_nutrition(
    volume_ml: f64,
    duration_hours: Option<f64>,
    rate_ml_per_hour: Option<f64>,
    formula: &FormulaRecord,
) -> Nutrition {
    let total_calories = volume_ml * formula.calories_per_ml;

    let daily_calories = match (
        duration_hours.filter(|h| *h > 0.0),
        rate_ml_per_hour.filter(|r| *r > 0.0),
    ) {
        (Some(hours), _) => Some((total_calories / hours) * HOURS_PER_DAY),
        (None, Some(rate)) => {
            let daily_volume = rate * HOURS_PER_DAY;
            Some(daily_volume * formula.calories_per_ml)
        }
        (None, None) => None,
    };

    // Protein follows the calorie basis rather than the raw volume
    let total_protein_grams = total_calories / formula.calories_per_ml * formula.protein_per_ml;

    Nutrition {
        total_calories,
        daily_calories,
        total_protein_grams,
    }
}
