pub mod calculator;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod usage;

pub use calculator::{solve, FeedCalculator};
pub use catalog::FormulaCatalog;
pub use error::{FeedError, Result};
pub use matcher::search;
pub use models::{CalculationInput, CalculationKind, CalculationResult, FormulaRecord};
