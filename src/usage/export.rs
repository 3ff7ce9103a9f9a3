use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::error::Result;
use crate::usage::store::EventLog;

/// Output format for `export`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// File name used when no output path is given.
pub fn default_export_name(now: DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "tube-feed-calculations-{}.{}",
        now.format("%Y-%m-%d"),
        format.extension()
    )
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write calculation history, newest first, as a JSON document.
pub fn export_json(log: &EventLog, path: &Path, now: DateTime<Utc>) -> Result<()> {
    let calculations = log.history();
    let total = calculations.len();
    let json = serde_json::json!({
        "calculations": calculations,
        "exportDate": now.to_rfc3339(),
        "totalCalculations": total,
    });
    fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}

/// Write calculation history, newest first, one CSV row per calculation.
pub fn export_csv(log: &EventLog, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "id",
        "timestamp",
        "session_id",
        "calculation_type",
        "input_milliliters",
        "input_hours",
        "input_mil_per_hour",
        "output_milliliters",
        "output_hours",
        "output_mil_per_hour",
        "formula",
        "total_calories",
        "duration_seconds",
    ])?;

    for calc in log.history() {
        let formula = calc.selected_formula.as_ref();
        wtr.write_record([
            calc.id.clone(),
            calc.timestamp.to_rfc3339(),
            calc.session_id.clone(),
            calc.calculation_type.as_str().to_string(),
            fmt_opt(calc.inputs.milliliters),
            fmt_opt(calc.inputs.hours),
            fmt_opt(calc.inputs.mil_per_hour),
            fmt_opt(calc.outputs.milliliters),
            fmt_opt(calc.outputs.hours),
            fmt_opt(calc.outputs.mil_per_hour),
            formula.map(|f| f.name.clone()).unwrap_or_default(),
            fmt_opt(formula.and_then(|f| f.total_calories)),
            calc.duration.map(|d| format!("{:.1}", d)).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
