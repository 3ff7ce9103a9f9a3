use std::time::Instant;

use tracing::{debug, warn};

use crate::calculator::calculations::solve;
use crate::error::Result;
use crate::models::{CalculationInput, CalculationKind, CalculationResult, FeedField, FormulaRecord, Nutrition};
use crate::usage::{generate_session_id, CalculationEvent, EventSink, SessionEvent};

/// Calculator state for one user session.
///
/// Holds the raw field text, the field that was last solved, the attached
/// formula and its derived nutrition.
#[derive(Debug, Clone)]
pub struct FeedCalculator {
    session_id: String,
    volume: String,
    hours: String,
    rate: String,
    solved: Option<CalculationKind>,
    formula: Option<FormulaRecord>,
    nutrition: Option<Nutrition>,
    /// When the first field was entered.
    started_at: Option<Instant>,
}

impl FeedCalculator {
    pub fn new() -> Self {
        Self::with_session(generate_session_id())
    }

    /// New session with a fresh id, recorded as started in `sink`.
    ///
    /// A failure to record is logged and the calculator still returned.
    pub fn start(sink: &mut dyn EventSink) -> Self {
        let calculator = Self::new();
        if let Err(e) = sink.record_session(SessionEvent::start(&calculator.session_id)) {
            warn!(error = %e, "failed to record session start");
        }
        debug!(session = %calculator.session_id, "session started");
        calculator
    }

    pub fn with_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            volume: String::new(),
            hours: String::new(),
            rate: String::new(),
            solved: None,
            formula: None,
            nutrition: None,
            started_at: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn enter_volume(&mut self, raw: &str) {
        self.enter(FeedField::Volume, raw);
    }

    pub fn enter_hours(&mut self, raw: &str) {
        self.enter(FeedField::Hours, raw);
    }

    pub fn enter_rate(&mut self, raw: &str) {
        self.enter(FeedField::Rate, raw);
    }

    /// Set a field's raw text; the first non-blank entry starts the timer.
    pub fn enter(&mut self, field: FeedField, raw: &str) {
        if self.started_at.is_none() && !raw.trim().is_empty() {
            self.started_at = Some(Instant::now());
        }
        *self.field_mut(field) = raw.to_string();
    }

    /// Current raw text of a field, including a solved value with its unit.
    pub fn field(&self, field: FeedField) -> &str {
        match field {
            FeedField::Volume => &self.volume,
            FeedField::Hours => &self.hours,
            FeedField::Rate => &self.rate,
        }
    }

    fn field_mut(&mut self, field: FeedField) -> &mut String {
        match field {
            FeedField::Volume => &mut self.volume,
            FeedField::Hours => &mut self.hours,
            FeedField::Rate => &mut self.rate,
        }
    }

    pub fn solved(&self) -> Option<CalculationKind> {
        self.solved
    }

    pub fn formula(&self) -> Option<&FormulaRecord> {
        self.formula.as_ref()
    }

    pub fn nutrition(&self) -> Option<&Nutrition> {
        self.nutrition.as_ref()
    }

    /// Attach a formula. Nutrition from a previous formula is dropped until the next solve.
    pub fn attach_formula(&mut self, formula: FormulaRecord) {
        debug!(formula = %formula.name, "formula attached");
        self.formula = Some(formula);
        self.nutrition = None;
    }

    pub fn input(&self) -> CalculationInput {
        CalculationInput::from_raw(&self.volume, &self.hours, &self.rate)
    }

    /// Solve from the current fields and record the calculation.
    ///
    /// The solved field is written back as its display string. Recording is
    /// fire-and-forget: a sink error is logged and the result still returned.
    pub fn calculate(&mut self, sink: &mut dyn EventSink) -> Result<CalculationResult> {
        let input = self.input();
        let result = solve(&input, self.formula.as_ref())?;

        let field = result.kind.solved_field();
        *self.field_mut(field) = result.solved_display();
        self.solved = Some(result.kind);
        self.nutrition = result.nutrition;

        let elapsed = self.started_at.map(|t| t.elapsed());
        let event = CalculationEvent::new(
            &self.session_id,
            &input,
            &result,
            self.formula.as_ref(),
            elapsed,
        );
        if let Err(e) = sink.record_calculation(event) {
            warn!(error = %e, "failed to record calculation");
        }

        Ok(result)
    }

    /// Display text for a field of `result`: entered fields as typed, the
    /// solved field with two decimals.
    pub fn display(&self, result: &CalculationResult, field: FeedField) -> String {
        result.display_entered(field, self.field(field))
    }

    /// Clear fields, solved marker, formula, nutrition and timer together.
    ///
    /// The session id is kept.
    pub fn reset(&mut self) {
        let session_id = std::mem::take(&mut self.session_id);
        *self = Self::with_session(session_id);
    }
}

impl Default for FeedCalculator {
    fn default() -> Self {
        Self::new()
    }
}
