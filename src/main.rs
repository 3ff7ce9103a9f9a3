use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, warn};

use tube_feed_calc_rs::calculator::FeedCalculator;
use tube_feed_calc_rs::catalog::FormulaCatalog;
use tube_feed_calc_rs::cli::{Cli, Command};
use tube_feed_calc_rs::config::{AppConfig, LogTarget};
use tube_feed_calc_rs::error::{FeedError, Result};
use tube_feed_calc_rs::interface::{
    display_formula_list, display_history, display_result, display_stats, prompt_field,
    prompt_formula_by_name, prompt_formula_choice, prompt_formula_source, prompt_search_query,
    prompt_yes_no, FormulaSource,
};
use tube_feed_calc_rs::logging;
use tube_feed_calc_rs::matcher::search_and_record;
use tube_feed_calc_rs::models::{FeedField, FormulaRecord};
use tube_feed_calc_rs::usage::{
    compute_stats, default_export_name, export_csv, export_json, generate_session_id, EventSink,
    ExportFormat, FormulaSearchEvent, JsonFileEventLog,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AppConfig::from_cli(&cli);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Interactive => cmd_interactive(&config),
        Command::Calc {
            volume,
            hours,
            rate,
            formula,
        } => cmd_calc(&config, volume, hours, rate, formula),
        Command::Search { query } => cmd_search(&config, &query.join(" ")),
        Command::Formulas => cmd_formulas(&config),
        Command::Stats { days } => cmd_stats(&config, days),
        Command::History { limit } => cmd_history(&config, limit),
        Command::Export { out, format } => cmd_export(&config, out, format),
        Command::ClearLog { yes } => cmd_clear_log(&config, yes),
    }
}

/// Solve once from command-line fields.
fn cmd_calc(
    config: &AppConfig,
    volume: Option<String>,
    hours: Option<String>,
    rate: Option<String>,
    formula: Option<String>,
) -> Result<()> {
    let catalog = config.load_catalog()?;
    let mut sink = config.open_sink();
    let mut calculator = FeedCalculator::start(&mut *sink);

    calculator.enter_volume(volume.as_deref().unwrap_or(""));
    calculator.enter_hours(hours.as_deref().unwrap_or(""));
    calculator.enter_rate(rate.as_deref().unwrap_or(""));

    if let Some(name) = formula {
        let record = catalog.find(&name)?;
        if !record.name.eq_ignore_ascii_case(name.trim()) {
            println!("Using closest formula match: {}", record.name);
        }
        calculator.attach_formula(record.clone());
    }

    match calculator.calculate(&mut *sink) {
        Ok(result) => {
            display_result(&calculator, &result);
            Ok(())
        }
        Err(e) if e.is_user_prompt() => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Prompt-driven calculator loop.
fn cmd_interactive(config: &AppConfig) -> Result<()> {
    let catalog = config.load_catalog()?;
    let mut sink = config.open_sink();
    let mut calculator = FeedCalculator::start(&mut *sink);

    println!("Tube Feed Calculator");
    println!("Fill in any two fields and leave the third blank.");
    println!();

    loop {
        let previous = calculator.formula().cloned();
        calculator.reset();

        match prompt_formula_source(previous.as_ref())? {
            FormulaSource::Keep => {
                if let Some(formula) = previous {
                    calculator.attach_formula(formula);
                }
            }
            FormulaSource::None => {}
            FormulaSource::Search => {
                if let Some(formula) = choose_from_search(&catalog, sink.as_mut(), &calculator)? {
                    calculator.attach_formula(formula);
                }
            }
            FormulaSource::ByName => {
                if let Some(formula) = prompt_formula_by_name(&catalog)? {
                    calculator.attach_formula(formula.clone());
                }
            }
        }

        for field in [FeedField::Volume, FeedField::Hours, FeedField::Rate] {
            let raw = prompt_field(field)?;
            calculator.enter(field, &raw);
        }

        match calculator.calculate(&mut *sink) {
            Ok(result) => display_result(&calculator, &result),
            Err(e) if e.is_user_prompt() => println!("{}", e),
            Err(e) => return Err(e),
        }

        if !prompt_yes_no("Calculate another?", true)? {
            break;
        }
        println!();
    }

    Ok(())
}

/// Run a search, let the user pick a result and record the pick.
fn choose_from_search(
    catalog: &FormulaCatalog,
    sink: &mut dyn EventSink,
    calculator: &FeedCalculator,
) -> Result<Option<FormulaRecord>> {
    let query = prompt_search_query()?;
    let started = Instant::now();

    let results = match search_and_record(&query, catalog.formulas(), sink, calculator.session_id()) {
        Ok(results) => results,
        Err(FeedError::EmptyQuery) => {
            println!("{}", FeedError::EmptyQuery);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if results.is_empty() {
        println!("No formulas matched '{}'.", query.trim());
        return Ok(None);
    }

    display_formula_list(&results, "Search results");

    let Some(index) = prompt_formula_choice(&results)? else {
        return Ok(None);
    };
    let selected = results[index];
    debug!(formula = %selected.name, "formula selected from search");

    let event = FormulaSearchEvent::new(
        calculator.session_id(),
        query.trim(),
        results.len(),
        Some(&selected.name),
        Some(started.elapsed()),
    );
    if let Err(e) = sink.record_search(event) {
        warn!(error = %e, "failed to record formula selection");
    }

    Ok(Some(selected.clone()))
}

fn cmd_search(config: &AppConfig, query: &str) -> Result<()> {
    let catalog = config.load_catalog()?;
    let mut sink = config.open_sink();
    let session_id = generate_session_id();

    let results = match search_and_record(query, catalog.formulas(), &mut *sink, &session_id) {
        Ok(results) => results,
        Err(e) if e.is_user_prompt() => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if results.is_empty() {
        println!("No formulas matched '{}'.", query.trim());
        return Ok(());
    }

    display_formula_list(&results, &format!("Results for '{}'", query.trim()));
    Ok(())
}

fn cmd_formulas(config: &AppConfig) -> Result<()> {
    let catalog = config.load_catalog()?;
    let formulas: Vec<&FormulaRecord> = catalog.iter().collect();
    display_formula_list(&formulas, "Formula catalog");
    Ok(())
}

fn cmd_stats(config: &AppConfig, days: u32) -> Result<()> {
    let log = config.load_log()?;
    let stats = compute_stats(&log, days, Utc::now());
    display_stats(&stats);
    Ok(())
}

fn cmd_history(config: &AppConfig, limit: usize) -> Result<()> {
    let log = config.load_log()?;
    display_history(&log.history(), limit);
    Ok(())
}

fn cmd_export(config: &AppConfig, out: Option<PathBuf>, format: ExportFormat) -> Result<()> {
    let log = config.load_log()?;
    if log.calculations.is_empty() {
        println!("No calculations to export.");
        return Ok(());
    }

    let now = Utc::now();
    let path = out.unwrap_or_else(|| PathBuf::from(default_export_name(now, format)));

    match format {
        ExportFormat::Json => export_json(&log, &path, now)?,
        ExportFormat::Csv => export_csv(&log, &path)?,
    }

    println!(
        "Exported {} calculations to {}",
        log.calculations.len(),
        path.display()
    );
    Ok(())
}

fn cmd_clear_log(config: &AppConfig, yes: bool) -> Result<()> {
    let LogTarget::File(path) = &config.log_target else {
        println!("Usage log is in memory; nothing to clear.");
        return Ok(());
    };

    if !yes && !prompt_yes_no("Delete all recorded calculations?", false)? {
        println!("Cancelled.");
        return Ok(());
    }

    JsonFileEventLog::new(path).clear_calculations()?;
    println!("Calculation history cleared.");
    Ok(())
}
