use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{FeedError, Result};
use crate::matcher::constants::*;
use crate::matcher::rules::{MatchRule, MATCH_RULES};
use crate::models::FormulaRecord;
use crate::usage::{EventSink, FormulaSearchEvent};

/// Phase 1: sum the priority of every applicable rule whose predicate a record passes.
///
/// `query` must already be trimmed and lowercased. Returns one score per record.
pub fn score_by_rules(query: &str, formulas: &[FormulaRecord], rules: &[MatchRule]) -> Vec<u32> {
    let mut scores = vec![0; formulas.len()];

    for rule in rules.iter().filter(|r| r.applies_to(query)) {
        debug!(rule = rule.label, priority = rule.priority, "search rule applies");
        for (score, formula) in scores.iter_mut().zip(formulas) {
            if rule.predicate.matches(formula) {
                *score += rule.priority;
            }
        }
    }

    scores
}

/// Phase 2: award each field category once when it contains the query.
///
/// `query` must already be trimmed and lowercased. Returns one score per record.
pub fn score_by_substring(query: &str, formulas: &[FormulaRecord]) -> Vec<u32> {
    let contains = |text: &str| text.to_lowercase().contains(query);

    formulas
        .iter()
        .map(|f| {
            let mut score = 0;
            if contains(f.name.as_str()) {
                score += FALLBACK_NAME_SCORE;
            }
            if contains(f.brand.as_str()) {
                score += FALLBACK_BRAND_SCORE;
            }
            if contains(f.description.as_str()) {
                score += FALLBACK_DESCRIPTION_SCORE;
            }
            if f.indications.iter().any(|i| contains(i.as_str())) {
                score += FALLBACK_INDICATION_SCORE;
            }
            if f.features().iter().any(|s| contains(s.as_str())) {
                score += FALLBACK_FEATURE_SCORE;
            }
            score
        })
        .collect()
}

/// Drop zero scores, order by score descending (stable, so ties keep
/// catalog order) and keep the top `MAX_RESULTS`.
fn rank<'a>(formulas: &'a [FormulaRecord], scores: &[u32]) -> Vec<&'a FormulaRecord> {
    let mut candidates: Vec<(&FormulaRecord, u32)> = formulas
        .iter()
        .zip(scores.iter().copied())
        .filter(|(_, score)| *score > 0)
        .collect();

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(MAX_RESULTS);
    candidates.into_iter().map(|(f, _)| f).collect()
}

/// Search the catalog with the built-in rule list.
pub fn search<'a>(query: &str, formulas: &'a [FormulaRecord]) -> Result<Vec<&'a FormulaRecord>> {
    search_with_rules(query, formulas, MATCH_RULES)
}

/// Search with a caller-supplied rule list.
///
/// Rule scoring runs first; substring scoring is only used when no record
/// scored under the rules. A blank query is rejected rather than treated as
/// matching nothing.
pub fn search_with_rules<'a>(
    query: &str,
    formulas: &'a [FormulaRecord],
    rules: &[MatchRule],
) -> Result<Vec<&'a FormulaRecord>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(FeedError::EmptyQuery);
    }

    let mut scores = score_by_rules(&query, formulas, rules);
    if scores.iter().all(|s| *s == 0) {
        debug!(query = %query, "no rule matches, using substring fallback");
        scores = score_by_substring(&query, formulas);
    }

    let results = rank(formulas, &scores);
    debug!(query = %query, results = results.len(), "formula search complete");
    Ok(results)
}

/// Search and record the search in the usage log.
///
/// A blank query returns `EmptyQuery` without recording anything. A failure
/// to record is logged and does not affect the results.
pub fn search_and_record<'a>(
    query: &str,
    formulas: &'a [FormulaRecord],
    sink: &mut dyn EventSink,
    session_id: &str,
) -> Result<Vec<&'a FormulaRecord>> {
    let started = Instant::now();
    let results = search(query, formulas)?;

    let event = FormulaSearchEvent::new(
        session_id,
        query.trim(),
        results.len(),
        None,
        Some(started.elapsed()),
    );
    if let Err(e) = sink.record_search(event) {
        warn!(error = %e, "failed to record formula search");
    }

    Ok(results)
}
