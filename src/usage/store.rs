use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::usage::events::{CalculationEvent, FormulaSearchEvent, SessionEvent};

/// Receiver for usage events.
///
/// Callers treat recording as fire-and-forget: an error here is logged and
/// never surfaced to the calculator or matcher.
pub trait EventSink {
    fn record_calculation(&mut self, event: CalculationEvent) -> Result<()>;
    fn record_search(&mut self, event: FormulaSearchEvent) -> Result<()>;
    fn record_session(&mut self, event: SessionEvent) -> Result<()>;
}

/// All recorded usage events.
///
/// Also serves as the in-memory sink when nothing should touch disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    #[serde(default)]
    pub calculations: Vec<CalculationEvent>,

    #[serde(default)]
    pub searches: Vec<FormulaSearchEvent>,

    #[serde(default)]
    pub sessions: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculations newest first.
    pub fn history(&self) -> Vec<&CalculationEvent> {
        let mut calculations: Vec<&CalculationEvent> = self.calculations.iter().collect();
        calculations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        calculations
    }

    pub fn clear_calculations(&mut self) {
        self.calculations.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.calculations.is_empty() && self.searches.is_empty() && self.sessions.is_empty()
    }
}

impl EventSink for EventLog {
    fn record_calculation(&mut self, event: CalculationEvent) -> Result<()> {
        self.calculations.push(event);
        Ok(())
    }

    fn record_search(&mut self, event: FormulaSearchEvent) -> Result<()> {
        self.searches.push(event);
        Ok(())
    }

    fn record_session(&mut self, event: SessionEvent) -> Result<()> {
        self.sessions.push(event);
        Ok(())
    }
}

/// Event log persisted as a JSON document.
///
/// Every record is a read-modify-write of the whole file; the file is
/// created on the first write.
#[derive(Debug, Clone)]
pub struct JsonFileEventLog {
    path: PathBuf,
}

impl JsonFileEventLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the log. A missing file is an empty log.
    pub fn load(&self) -> Result<EventLog> {
        if !self.path.exists() {
            return Ok(EventLog::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(EventLog::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, log: &EventLog) -> Result<()> {
        let json = serde_json::to_string_pretty(log)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove all calculation events, keeping searches.
    pub fn clear_calculations(&self) -> Result<()> {
        let mut log = self.load()?;
        log.clear_calculations();
        self.save(&log)
    }

    fn update<F: FnOnce(&mut EventLog)>(&self, f: F) -> Result<()> {
        let mut log = self.load()?;
        f(&mut log);
        self.save(&log)?;
        debug!(path = %self.path.display(), "usage log updated");
        Ok(())
    }
}

impl EventSink for JsonFileEventLog {
    fn record_calculation(&mut self, event: CalculationEvent) -> Result<()> {
        self.update(|log| log.calculations.push(event))
    }

    fn record_search(&mut self, event: FormulaSearchEvent) -> Result<()> {
        self.update(|log| log.searches.push(event))
    }

    fn record_session(&mut self, event: SessionEvent) -> Result<()> {
        self.update(|log| log.sessions.push(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    use crate::models::CalculationKind;
    use crate::usage::events::FieldValues;

    fn calc_event(id: &str, minutes_ago: i64) -> CalculationEvent {
        CalculationEvent {
            id: id.to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            session_id: "s1".to_string(),
            calculation_type: CalculationKind::FeedRate,
            inputs: FieldValues::default(),
            outputs: FieldValues::default(),
            selected_formula: None,
            duration: None,
        }
    }

    #[test]
    fn test_history_newest_first() {
        let mut log = EventLog::new();
        log.record_calculation(calc_event("old", 30)).unwrap();
        log.record_calculation(calc_event("new", 1)).unwrap();
        log.record_calculation(calc_event("mid", 10)).unwrap();

        let ids: Vec<&str> = log.history().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_file_log_created_on_first_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        let mut store = JsonFileEventLog::new(&path);

        assert!(store.load().unwrap().is_empty());
        assert!(!path.exists());

        store.record_calculation(calc_event("a", 0)).unwrap();
        store
            .record_search(FormulaSearchEvent::new("s1", "copd", 1, None, None))
            .unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.calculations.len(), 1);
        assert_eq!(log.searches.len(), 1);
        assert_eq!(log.searches[0].search_query, "copd");
    }

    #[test]
    fn test_clear_calculations_keeps_searches() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileEventLog::new(dir.path().join("log.json"));
        store.record_calculation(calc_event("a", 0)).unwrap();
        store
            .record_search(FormulaSearchEvent::new("s1", "fiber", 5, None, None))
            .unwrap();

        store.clear_calculations().unwrap();

        let log = store.load().unwrap();
        assert!(log.calculations.is_empty());
        assert_eq!(log.searches.len(), 1);
    }

    #[test]
    fn test_sessions_persist_alongside_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        let mut store = JsonFileEventLog::new(&path);

        store.record_session(SessionEvent::start("session-a")).unwrap();
        store.record_calculation(calc_event("a", 0)).unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.sessions.len(), 1);
        assert_eq!(log.sessions[0].session_id, "session-a");
        assert_eq!(log.calculations.len(), 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"sessions\""));
    }

    #[test]
    fn test_unwritable_path_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileEventLog::new(dir.path().join("missing").join("log.json"));
        assert!(store.record_calculation(calc_event("a", 0)).is_err());
    }
}
