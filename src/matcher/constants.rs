/// Maximum number of formulas a search returns.
pub const MAX_RESULTS: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Rule priorities (phase 1)
// ─────────────────────────────────────────────────────────────────────────────

/// Query names a brand.
pub const PRIORITY_BRAND: u32 = 10;

/// Query names a medical condition.
pub const PRIORITY_CONDITION: u32 = 9;

/// Query names a formulation feature (plant-based, elemental, peptide, whole food).
pub const PRIORITY_FEATURE: u32 = 8;

/// Query names a calorie, fiber or protein attribute.
pub const PRIORITY_ATTRIBUTE: u32 = 7;

/// Query names a tolerance attribute (isotonic, allergen-free).
pub const PRIORITY_TOLERANCE: u32 = 6;

/// Query asks for a standard formula.
pub const PRIORITY_STANDARD: u32 = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Substring fallback weights (phase 2)
// ─────────────────────────────────────────────────────────────────────────────

pub const FALLBACK_NAME_SCORE: u32 = 10;
pub const FALLBACK_BRAND_SCORE: u32 = 8;
pub const FALLBACK_DESCRIPTION_SCORE: u32 = 6;
pub const FALLBACK_INDICATION_SCORE: u32 = 7;
pub const FALLBACK_FEATURE_SCORE: u32 = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Predicate thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Calorie density counted as "high calorie" (kcal/mL).
pub const HIGH_CALORIE_PER_ML: f64 = 1.2;

/// Protein density counted as "high protein" (g/mL).
pub const HIGH_PROTEIN_PER_ML: f64 = 0.05;

/// Upper osmolality bound for an isotonic formula (mOsm/kg).
pub const ISOTONIC_MAX_OSMOLALITY: f64 = 300.0;
