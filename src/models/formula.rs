use serde::{Deserialize, Serialize};

/// An enteral formula from the catalog.
///
/// Energy and protein are stored per millilitre so feed volumes convert directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaRecord {
    pub name: String,

    pub brand: String,

    /// kcal per mL.
    pub calories_per_ml: f64,

    /// Grams of protein per mL.
    pub protein_per_ml: f64,

    pub description: String,

    #[serde(default)]
    pub indications: Vec<String>,

    /// mOsm/kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osmolality: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_features: Option<Vec<String>>,
}

impl FormulaRecord {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Protein density in g/L, the unit printed on formula labels.
    #[inline]
    pub fn protein_per_liter(&self) -> f64 {
        self.protein_per_ml * 1000.0
    }

    /// Special features, empty when the record has none.
    pub fn features(&self) -> &[String] {
        self.special_features.as_deref().unwrap_or(&[])
    }

    /// True when the fiber description names an actual fiber source.
    pub fn contains_fiber(&self) -> bool {
        self.fiber_content
            .as_deref()
            .is_some_and(|f| !f.to_lowercase().contains("free"))
    }

    /// True when the record is explicitly labelled fiber-free.
    pub fn is_fiber_free(&self) -> bool {
        self.fiber_content
            .as_deref()
            .is_some_and(|f| f.to_lowercase().contains("free"))
    }

    /// Basic validation: named, with finite positive energy and protein densities.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.calories_per_ml.is_finite()
            && self.calories_per_ml > 0.0
            && self.protein_per_ml.is_finite()
            && self.protein_per_ml > 0.0
            && self.osmolality.is_none_or(|o| o.is_finite() && o > 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} cal/mL, {:.1} g/L protein",
            self.name,
            self.brand,
            self.calories_per_ml,
            self.protein_per_liter()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_formula() -> FormulaRecord {
        FormulaRecord {
            name: "Jevity 1.2".to_string(),
            brand: "Abbott".to_string(),
            calories_per_ml: 1.2,
            protein_per_ml: 0.056,
            description: "Higher calorie fiber-containing enteral formula".to_string(),
            indications: vec!["Fluid restriction".to_string()],
            osmolality: Some(390.0),
            fiber_content: Some("14g per 1000mL".to_string()),
            special_features: Some(vec!["High calorie".to_string()]),
        }
    }

    #[test]
    fn test_protein_per_liter() {
        let formula = sample_formula();
        assert!((formula.protein_per_liter() - 56.0).abs() < 0.001);
    }

    #[test]
    fn test_fiber_flags() {
        let mut formula = sample_formula();
        assert!(formula.contains_fiber());
        assert!(!formula.is_fiber_free());

        formula.fiber_content = Some("Fiber-free".to_string());
        assert!(!formula.contains_fiber());
        assert!(formula.is_fiber_free());

        formula.fiber_content = None;
        assert!(!formula.contains_fiber());
        assert!(!formula.is_fiber_free());
    }

    #[test]
    fn test_is_valid() {
        assert!(sample_formula().is_valid());

        let mut invalid = sample_formula();
        invalid.calories_per_ml = 0.0;
        assert!(!invalid.is_valid());

        let mut unnamed = sample_formula();
        unnamed.name = "  ".to_string();
        assert!(!unnamed.is_valid());
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"{
            "name": "Nutrison",
            "brand": "Nutricia",
            "caloriesPerMl": 1.0,
            "proteinPerMl": 0.04,
            "description": "Standard enteral formula for tube feeding",
            "indications": ["General nutrition"]
        }"#;
        let formula: FormulaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(formula.brand, "Nutricia");
        assert!(formula.osmolality.is_none());
        assert!(formula.features().is_empty());

        let out = serde_json::to_string(&formula).unwrap();
        assert!(out.contains("\"caloriesPerMl\""));
        assert!(!out.contains("osmolality"));
    }
}
