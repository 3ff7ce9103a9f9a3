use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::usage::{ExportFormat, DEFAULT_STATS_DAYS};

/// Tube feed calculator: solve volume, duration or feed rate and look up enteral formulas.
#[derive(Parser, Debug)]
#[command(name = "tube_feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a JSON formula catalog (defaults to the built-in catalog).
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Path to the usage log JSON file.
    #[arg(short, long, default_value = "tube_feed_log.json")]
    pub log_file: PathBuf,

    /// Keep the usage log in memory only.
    #[arg(long)]
    pub no_log: bool,

    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Prompt for fields and formulas until you quit.
    #[default]
    Interactive,

    /// Solve for the one field left blank.
    Calc {
        /// Total milliliters.
        #[arg(long, allow_hyphen_values = true)]
        volume: Option<String>,

        /// Total hours the feed runs.
        #[arg(long, allow_hyphen_values = true)]
        hours: Option<String>,

        /// Feed rate in mL per hour.
        #[arg(long, allow_hyphen_values = true)]
        rate: Option<String>,

        /// Formula name for calorie and protein totals.
        #[arg(short, long)]
        formula: Option<String>,
    },

    /// Search enteral formulas by brand, condition or feature.
    Search {
        /// Search terms, e.g. `kate farms` or `high calorie`.
        query: Vec<String>,
    },

    /// List every formula in the catalog.
    Formulas,

    /// Show usage stats for a lookback window.
    Stats {
        /// Lookback window in days.
        #[arg(short, long, default_value_t = DEFAULT_STATS_DAYS)]
        days: u32,
    },

    /// Show recorded calculations, newest first.
    History {
        /// Maximum number of entries to show.
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Export recorded calculations.
    Export {
        /// Output path (defaults to tube-feed-calculations-<date>.<ext>).
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Delete all recorded calculations.
    ClearLog {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_interactive() {
        let cli = Cli::try_parse_from(["tube_feed"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Interactive));
    }

    #[test]
    fn test_calc_args() {
        let cli = Cli::try_parse_from([
            "tube_feed", "calc", "--volume", "1000", "--hours", "8", "-f", "Jevity 1.2",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Calc {
                volume,
                hours,
                rate,
                formula,
            }) => {
                assert_eq!(volume.as_deref(), Some("1000"));
                assert_eq!(hours.as_deref(), Some("8"));
                assert!(rate.is_none());
                assert_eq!(formula.as_deref(), Some("Jevity 1.2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::try_parse_from(["tube_feed", "search", "kate", "farms"]).unwrap();
        match cli.command {
            Some(Command::Search { query }) => assert_eq!(query.join(" "), "kate farms"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_format() {
        let cli = Cli::try_parse_from(["tube_feed", "export", "--format", "csv"]).unwrap();
        match cli.command {
            Some(Command::Export { out, format }) => {
                assert!(out.is_none());
                assert_eq!(format, ExportFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
