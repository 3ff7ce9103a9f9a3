use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::usage::store::EventLog;

/// Default lookback window for usage stats.
pub const DEFAULT_STATS_DAYS: u32 = 7;

/// Aggregated usage over a lookback window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub days: u32,
    pub total_calculations: usize,
    pub total_searches: usize,
    /// Calculation count per attached formula name.
    pub popular_formulas: BTreeMap<String, usize>,
    /// Calculation count per kind (`feed_rate`, ...).
    pub calculation_types: BTreeMap<String, usize>,
    /// Calculation count per UTC day (`YYYY-MM-DD`).
    pub daily_usage: BTreeMap<String, usize>,
}

impl UsageStats {
    /// Formulas ordered by use, most used first; ties by name.
    pub fn top_formulas(&self) -> Vec<(&str, usize)> {
        let mut formulas: Vec<(&str, usize)> = self
            .popular_formulas
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        formulas.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        formulas
    }
}

/// Start of the lookback window. A window reaching past the representable
/// range covers every event.
fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Aggregate events strictly newer than `now - days`.
pub fn compute_stats(log: &EventLog, days: u32, now: DateTime<Utc>) -> UsageStats {
    let cutoff = window_start(now, days);

    let mut stats = UsageStats {
        days,
        total_searches: log.searches.iter().filter(|s| s.timestamp > cutoff).count(),
        ..Default::default()
    };

    for calc in log.calculations.iter().filter(|c| c.timestamp > cutoff) {
        stats.total_calculations += 1;

        let date = calc.timestamp.format("%Y-%m-%d").to_string();
        *stats.daily_usage.entry(date).or_insert(0) += 1;

        *stats
            .calculation_types
            .entry(calc.calculation_type.as_str().to_string())
            .or_insert(0) += 1;

        if let Some(name) = calc.formula_name() {
            *stats.popular_formulas.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::models::CalculationKind;
    use crate::usage::events::{CalculationEvent, FieldValues, FormulaSearchEvent, FormulaSnapshot};

    fn calc_at(ts: DateTime<Utc>, kind: CalculationKind, formula: Option<&str>) -> CalculationEvent {
        CalculationEvent {
            id: "id".to_string(),
            timestamp: ts,
            session_id: "s1".to_string(),
            calculation_type: kind,
            inputs: FieldValues::default(),
            outputs: FieldValues::default(),
            selected_formula: formula.map(|name| FormulaSnapshot {
                name: name.to_string(),
                brand: "Abbott".to_string(),
                calories_per_ml: 1.0,
                total_calories: None,
            }),
            duration: None,
        }
    }

    #[test]
    fn test_stats_window_and_counts() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let mut log = EventLog::new();
        log.calculations.push(calc_at(
            now - Duration::hours(2),
            CalculationKind::FeedRate,
            Some("Jevity 1.2"),
        ));
        log.calculations.push(calc_at(
            now - Duration::days(1),
            CalculationKind::FeedRate,
            Some("Jevity 1.2"),
        ));
        log.calculations.push(calc_at(
            now - Duration::days(2),
            CalculationKind::TotalHours,
            None,
        ));
        // Outside the window
        log.calculations.push(calc_at(
            now - Duration::days(8),
            CalculationKind::TotalVolume,
            Some("Nepro"),
        ));

        let mut search = FormulaSearchEvent::new("s1", "abbott", 5, None, None);
        search.timestamp = now - Duration::days(3);
        log.searches.push(search.clone());
        search.timestamp = now - Duration::days(30);
        log.searches.push(search);

        let stats = compute_stats(&log, 7, now);
        assert_eq!(stats.total_calculations, 3);
        assert_eq!(stats.total_searches, 1);
        assert_eq!(stats.popular_formulas.get("Jevity 1.2"), Some(&2));
        assert!(!stats.popular_formulas.contains_key("Nepro"));
        assert_eq!(stats.calculation_types.get("feed_rate"), Some(&2));
        assert_eq!(stats.calculation_types.get("total_hours"), Some(&1));
        assert_eq!(stats.daily_usage.get("2025-03-10"), Some(&1));
        assert_eq!(stats.daily_usage.get("2025-03-09"), Some(&1));
        assert_eq!(stats.daily_usage.get("2025-03-08"), Some(&1));
    }

    #[test]
    fn test_event_on_cutoff_is_excluded() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let mut log = EventLog::new();
        log.calculations
            .push(calc_at(now - Duration::days(7), CalculationKind::FeedRate, None));

        let stats = compute_stats(&log, 7, now);
        assert_eq!(stats.total_calculations, 0);
    }

    #[test]
    fn test_top_formulas_order() {
        let mut stats = UsageStats::default();
        stats.popular_formulas.insert("Nepro".to_string(), 1);
        stats.popular_formulas.insert("Jevity 1.2".to_string(), 3);
        stats.popular_formulas.insert("Impact".to_string(), 1);

        let top = stats.top_formulas();
        assert_eq!(top, vec![("Jevity 1.2", 3), ("Impact", 1), ("Nepro", 1)]);
    }

    #[test]
    fn test_huge_window_counts_everything() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let mut log = EventLog::new();
        log.calculations.push(calc_at(
            now - Duration::days(3650),
            CalculationKind::FeedRate,
            None,
        ));

        let stats = compute_stats(&log, u32::MAX, now);
        assert_eq!(stats.days, u32::MAX);
        assert_eq!(stats.total_calculations, 1);
        assert_eq!(window_start(now, u32::MAX), DateTime::<Utc>::MIN_UTC);
    }
}
