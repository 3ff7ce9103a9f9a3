use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationInput, CalculationKind, CalculationResult, FeedField, FormulaRecord};

/// Length of the random suffix in generated ids.
const ID_SUFFIX_LEN: usize = 9;

/// Generate an event id of the form `<unix-millis>-<9 base36 chars>`.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

pub fn generate_session_id() -> String {
    format!("session-{}", generate_id())
}

/// Calculator field values as they are stored in the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milliliters: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mil_per_hour: Option<f64>,
}

impl FieldValues {
    /// Entered values as typed, negatives included; zero and blank are omitted.
    fn from_input(input: &CalculationInput) -> Self {
        let logged = |v: Option<f64>| v.filter(|x| x.is_finite() && *x != 0.0);
        Self {
            milliliters: logged(input.volume_ml),
            hours: logged(input.duration_hours),
            mil_per_hour: logged(input.rate_ml_per_hour),
        }
    }

    fn solved(result: &CalculationResult) -> Self {
        let value = Some(result.solved_value());
        match result.kind.solved_field() {
            FeedField::Volume => Self {
                milliliters: value,
                ..Default::default()
            },
            FeedField::Hours => Self {
                hours: value,
                ..Default::default()
            },
            FeedField::Rate => Self {
                mil_per_hour: value,
                ..Default::default()
            },
        }
    }
}

/// The formula attached to a calculation, captured at the time it ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSnapshot {
    pub name: String,
    pub brand: String,
    pub calories_per_ml: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
}

/// One successful calculator solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub calculation_type: CalculationKind,
    pub inputs: FieldValues,
    pub outputs: FieldValues,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_formula: Option<FormulaSnapshot>,

    /// Seconds from the first entered field to the solve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl CalculationEvent {
    pub fn new(
        session_id: &str,
        input: &CalculationInput,
        result: &CalculationResult,
        formula: Option<&FormulaRecord>,
        elapsed: Option<Duration>,
    ) -> Self {
        Self {
            id: generate_id(),
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            calculation_type: result.kind,
            inputs: FieldValues::from_input(input),
            outputs: FieldValues::solved(result),
            selected_formula: formula.map(|f| FormulaSnapshot {
                name: f.name.clone(),
                brand: f.brand.clone(),
                calories_per_ml: f.calories_per_ml,
                total_calories: result.total_calories(),
            }),
            duration: elapsed.map(|d| d.as_secs_f64()),
        }
    }

    /// Name of the attached formula, if any.
    pub fn formula_name(&self) -> Option<&str> {
        self.selected_formula.as_ref().map(|f| f.name.as_str())
    }
}

/// One formula search, or a selection made from its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSearchEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub search_query: String,
    pub results_count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_formula: Option<String>,

    /// Seconds the search took.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_duration: Option<f64>,
}

impl FormulaSearchEvent {
    pub fn new(
        session_id: &str,
        query: &str,
        results_count: usize,
        selected_formula: Option<&str>,
        elapsed: Option<Duration>,
    ) -> Self {
        Self {
            id: generate_id(),
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            search_query: query.to_string(),
            results_count,
            selected_formula: selected_formula.map(str::to_string),
            search_duration: elapsed.map(|d| d.as_secs_f64()),
        }
    }
}

/// Start of a calculator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    pub session_id: String,
    pub start_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub total_calculations: usize,

    #[serde(default)]
    pub total_searches: usize,

    #[serde(default)]
    pub unique_formulas_used: Vec<String>,
}

impl SessionEvent {
    /// A freshly started session with nothing recorded yet.
    pub fn start(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            start_time: Utc::now(),
            end_time: None,
            total_calculations: 0,
            total_searches: 0,
            unique_formulas_used: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_calculation_event_captures_solved_field_only() {
        let input = CalculationInput::new(Some(1000.0), Some(8.0), None);
        let result = CalculationResult {
            kind: CalculationKind::FeedRate,
            volume_ml: 1000.0,
            duration_hours: 8.0,
            rate_ml_per_hour: 125.0,
            nutrition: None,
        };
        let event = CalculationEvent::new("s1", &input, &result, None, None);

        assert_eq!(event.inputs.milliliters, Some(1000.0));
        assert_eq!(event.inputs.hours, Some(8.0));
        assert_eq!(event.inputs.mil_per_hour, None);
        assert_eq!(event.outputs.mil_per_hour, Some(125.0));
        assert_eq!(event.outputs.milliliters, None);
        assert!(event.formula_name().is_none());
    }

    #[test]
    fn test_calculation_event_keeps_negative_inputs() {
        let input = CalculationInput::from_raw("-200", "0", "50");
        let result = CalculationResult {
            kind: CalculationKind::TotalHours,
            volume_ml: 200.0,
            duration_hours: 4.0,
            rate_ml_per_hour: 50.0,
            nutrition: None,
        };
        let event = CalculationEvent::new("s1", &input, &result, None, None);

        assert_eq!(event.inputs.milliliters, Some(-200.0));
        assert_eq!(event.inputs.hours, None);
        assert_eq!(event.inputs.mil_per_hour, Some(50.0));
    }

    #[test]
    fn test_session_event_json() {
        let session = SessionEvent::start("session-1");
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"sessionId\":\"session-1\""));
        assert!(json.contains("\"startTime\""));
        assert!(json.contains("\"totalCalculations\":0"));
        assert!(json.contains("\"uniqueFormulasUsed\":[]"));
        assert!(!json.contains("endTime"));
    }

    #[test]
    fn test_event_json_uses_camel_case_field_names() {
        let event = FormulaSearchEvent::new("s1", "diabetes", 1, Some("Glucerna 1.0"), None);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"searchQuery\":\"diabetes\""));
        assert!(json.contains("\"resultsCount\":1"));
        assert!(json.contains("\"selectedFormula\":\"Glucerna 1.0\""));
        assert!(!json.contains("searchDuration"));
    }
}
