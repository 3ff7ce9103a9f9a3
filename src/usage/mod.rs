mod events;
mod export;
mod stats;
mod store;

pub use events::{
    generate_id, generate_session_id, CalculationEvent, FieldValues, FormulaSearchEvent,
    FormulaSnapshot, SessionEvent,
};
pub use export::{default_export_name, export_csv, export_json, ExportFormat};
pub use stats::{compute_stats, UsageStats, DEFAULT_STATS_DAYS};
pub use store::{EventLog, EventSink, JsonFileEventLog};
