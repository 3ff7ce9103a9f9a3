use dialoguer::{Confirm, Input, Select};

use crate::catalog::FormulaCatalog;
use crate::error::Result;
use crate::models::{FeedField, FormulaRecord};

/// Field hints shown next to each prompt.
fn field_hint(field: FeedField) -> &'static str {
    match field {
        FeedField::Volume => "How many mL total?",
        FeedField::Hours => "Over how many hours? (45 min = 0.75)",
        FeedField::Rate => "mL per one hour",
    }
}

/// Prompt for one calculator field. Blank means "solve for this".
pub fn prompt_field(field: FeedField) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(format!(
            "{} - {} (leave blank to solve)",
            field.label(),
            field_hint(field)
        ))
        .allow_empty(true)
        .interact_text()?;

    Ok(input)
}

/// How the user wants to pick a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaSource {
    Keep,
    None,
    Search,
    ByName,
}

/// Ask whether to attach a formula and how to find it.
pub fn prompt_formula_source(current: Option<&FormulaRecord>) -> Result<FormulaSource> {
    let mut options = Vec::new();
    let mut sources = Vec::new();

    if let Some(formula) = current {
        options.push(format!("Keep {}", formula.name));
        sources.push(FormulaSource::Keep);
    }
    options.push("No formula".to_string());
    sources.push(FormulaSource::None);
    options.push("Search formulas".to_string());
    sources.push(FormulaSource::Search);
    options.push("Enter formula name".to_string());
    sources.push(FormulaSource::ByName);

    let selection = Select::new()
        .with_prompt("Formula for calorie and protein totals")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(sources.get(selection).copied().unwrap_or(FormulaSource::None))
}

/// Prompt for a search query; may return blank.
pub fn prompt_search_query() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Search formulas (e.g. 'Kate Farms', 'diabetes', 'high calorie')")
        .allow_empty(true)
        .interact_text()?;

    Ok(input)
}

/// Let the user pick one of the search results.
///
/// Returns the index into `results`, or `None` for "None of these".
pub fn prompt_formula_choice(results: &[&FormulaRecord]) -> Result<Option<usize>> {
    let mut options: Vec<String> = results
        .iter()
        .map(|f| format!("{} ({}, {} cal/mL)", f.name, f.brand, f.calories_per_ml))
        .collect();
    options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Use which formula?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok((selection < results.len()).then_some(selection))
}

/// Prompt for a formula name with fuzzy matching.
pub fn prompt_formula_by_name(catalog: &FormulaCatalog) -> Result<Option<&FormulaRecord>> {
    let input: String = Input::new()
        .with_prompt("Formula name (or press Enter to skip)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    // Try exact match first (case-insensitive)
    if let Some(formula) = catalog.get(input) {
        return Ok(Some(formula));
    }

    let candidates = catalog.candidates(input);

    if candidates.is_empty() {
        println!("No matching formula found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let formula = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", formula.name))
            .default(true)
            .interact()?;

        return Ok(confirm.then_some(formula));
    }

    // Multiple matches - let user select
    let options: Vec<&FormulaRecord> = candidates.iter().take(5).map(|(f, _)| *f).collect();
    let mut labels: Vec<String> = options.iter().map(|f| f.name.clone()).collect();
    labels.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options.get(selection).copied())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
