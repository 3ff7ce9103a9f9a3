pub mod calculations;
pub mod constants;
mod session;

pub use calculations::{derive_nutrition, parse_field, parse_number, solve};
pub use constants::*;
pub use session::FeedCalculator;
