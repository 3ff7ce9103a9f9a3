/// Hours in a feeding day, used to extrapolate daily calories.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Decimal places shown for a solved field.
pub const SOLVED_DECIMALS: usize = 2;

/// Minimum number of usable fields needed to solve for the third.
pub const REQUIRED_FIELDS: usize = 2;
