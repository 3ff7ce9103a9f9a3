mod calculation;
mod formula;

pub use calculation::{CalculationInput, CalculationKind, CalculationResult, FeedField, Nutrition};
pub use formula::FormulaRecord;
