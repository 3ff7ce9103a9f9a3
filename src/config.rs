use std::path::PathBuf;

use tracing::info;

use crate::catalog::FormulaCatalog;
use crate::cli::Cli;
use crate::error::Result;
use crate::usage::{EventLog, EventSink, JsonFileEventLog};

/// Where usage events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Memory,
}

/// Settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Custom catalog; `None` uses the built-in formulas.
    pub catalog_path: Option<PathBuf>,
    pub log_target: LogTarget,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let log_target = if cli.no_log {
            LogTarget::Memory
        } else {
            LogTarget::File(cli.log_file.clone())
        };
        Self {
            catalog_path: cli.catalog.clone(),
            log_target,
        }
    }

    pub fn load_catalog(&self) -> Result<FormulaCatalog> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = FormulaCatalog::from_json_file(path)?;
                info!(path = %path.display(), count = catalog.len(), "loaded formula catalog");
                Ok(catalog)
            }
            None => Ok(FormulaCatalog::builtin()),
        }
    }

    /// Sink for new usage events.
    pub fn open_sink(&self) -> Box<dyn EventSink> {
        match &self.log_target {
            LogTarget::File(path) => Box::new(JsonFileEventLog::new(path)),
            LogTarget::Memory => Box::new(EventLog::new()),
        }
    }

    /// Previously recorded events; empty when logging to memory.
    pub fn load_log(&self) -> Result<EventLog> {
        match &self.log_target {
            LogTarget::File(path) => JsonFileEventLog::new(path).load(),
            LogTarget::Memory => Ok(EventLog::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::try_parse_from(["tube_feed"]).unwrap();
        let config = AppConfig::from_cli(&cli);
        assert!(config.catalog_path.is_none());
        assert_eq!(
            config.log_target,
            LogTarget::File(PathBuf::from("tube_feed_log.json"))
        );
        assert_eq!(config.load_catalog().unwrap().len(), 16);
    }

    #[test]
    fn test_no_log_uses_memory() {
        let cli = Cli::try_parse_from(["tube_feed", "--no-log", "formulas"]).unwrap();
        let config = AppConfig::from_cli(&cli);
        assert_eq!(config.log_target, LogTarget::Memory);
        assert!(config.load_log().unwrap().is_empty());
    }
}
