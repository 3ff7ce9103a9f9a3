use crate::calculator::FeedCalculator;
use crate::models::{CalculationResult, FeedField, FormulaRecord};
use crate::usage::{CalculationEvent, FieldValues, UsageStats};

/// Display a calculation with nutrition totals when a formula was attached.
///
/// Entered fields are echoed as typed in `calculator`.
pub fn display_result(calculator: &FeedCalculator, result: &CalculationResult) {
    println!();
    println!("=== {} ===", result.kind.label());
    println!();

    for field in [FeedField::Volume, FeedField::Hours, FeedField::Rate] {
        let marker = if field == result.kind.solved_field() {
            "  <= solved"
        } else {
            ""
        };
        println!(
            "  {:<18} {} {}{}",
            format!("{}:", field.label()),
            calculator.display(result, field),
            field.unit(),
            marker
        );
    }

    if let (Some(formula), Some(nutrition)) = (calculator.formula(), result.nutrition) {
        println!();
        println!("--- Nutrition ({}) ---", formula.name);
        println!("Total calories: {:.0} cal", nutrition.total_calories);
        match nutrition.daily_calories {
            Some(daily) => println!("Daily calories: {:.0} cal/day", daily),
            None => println!("Daily calories: n/a"),
        }
        println!("Total protein: {:.1}g", nutrition.total_protein_grams);
    }

    println!();
}

/// Display one formula with its clinical details.
pub fn display_formula_card(formula: &FormulaRecord) {
    println!("  {} - {}", formula.name, formula.brand);
    println!("    {}", formula.description);

    let mut facts = vec![
        format!("{} cal/mL", formula.calories_per_ml),
        format!("{:.1}g/L protein", formula.protein_per_liter()),
    ];
    if let Some(osmolality) = formula.osmolality {
        facts.push(format!("{} mOsm/kg", osmolality));
    }
    if let Some(fiber) = &formula.fiber_content {
        facts.push(format!("fiber: {}", fiber));
    }
    println!("    {}", facts.join(" | "));

    if !formula.indications.is_empty() {
        println!("    Indications: {}", formula.indications.join(", "));
    }
    if !formula.features().is_empty() {
        println!("    Features: {}", formula.features().join(", "));
    }
}

/// Display a titled list of formulas.
pub fn display_formula_list(formulas: &[&FormulaRecord], title: &str) {
    if formulas.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} formulas) ===", title, formulas.len());
    println!();

    for (i, formula) in formulas.iter().enumerate() {
        if i > 0 {
            println!();
        }
        display_formula_card(formula);
    }

    println!();
}

fn describe_fields(values: &FieldValues) -> String {
    let mut parts = Vec::new();
    if let Some(ml) = values.milliliters {
        parts.push(format!("{} mL", ml));
    }
    if let Some(hours) = values.hours {
        parts.push(format!("{} h", hours));
    }
    if let Some(rate) = values.mil_per_hour {
        parts.push(format!("{:.2} mL/h", rate));
    }
    parts.join(", ")
}

/// Display recorded calculations (already ordered newest first).
pub fn display_history(events: &[&CalculationEvent], limit: usize) {
    if events.is_empty() {
        println!("No calculations recorded yet.");
        return;
    }

    println!();
    println!("=== Calculation History ({} total) ===", events.len());
    println!();

    for event in events.iter().take(limit) {
        let formula = event
            .selected_formula
            .as_ref()
            .map(|f| match f.total_calories {
                Some(cal) => format!("  [{} - {:.0} cal]", f.name, cal),
                None => format!("  [{}]", f.name),
            })
            .unwrap_or_default();

        println!(
            "{}  {:<12}  {} => {}{}",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            event.calculation_type.label(),
            describe_fields(&event.inputs),
            describe_fields(&event.outputs),
            formula
        );
    }

    if events.len() > limit {
        println!("... {} older entries not shown", events.len() - limit);
    }
    println!();
}

/// Display aggregated usage.
pub fn display_stats(stats: &UsageStats) {
    println!();
    println!("=== Usage (last {} days) ===", stats.days);
    println!();
    println!("Calculations: {}", stats.total_calculations);
    println!("Searches: {}", stats.total_searches);

    if !stats.calculation_types.is_empty() {
        println!();
        println!("--- By type ---");
        for (kind, count) in &stats.calculation_types {
            println!("  {:<14} {}", kind, count);
        }
    }

    let formulas = stats.top_formulas();
    if !formulas.is_empty() {
        println!();
        println!("--- Popular formulas ---");
        for (name, count) in formulas {
            println!("  {:<26} {}", name, count);
        }
    }

    if !stats.daily_usage.is_empty() {
        println!();
        println!("--- Daily usage ---");
        for (date, count) in &stats.daily_usage {
            println!("  {}  {}", date, count);
        }
    }

    println!();
}
