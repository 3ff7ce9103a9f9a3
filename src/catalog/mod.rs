mod builtin;
mod persistence;

use strsim::jaro_winkler;
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::models::FormulaRecord;

pub use builtin::builtin_formulas;
pub use persistence::{load_formulas, save_formulas};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Read-only list of formulas, kept in declaration order.
///
/// Order matters: search ties are broken by catalog position.
#[derive(Debug, Clone)]
pub struct FormulaCatalog {
    formulas: Vec<FormulaRecord>,
}

impl FormulaCatalog {
    /// Build a catalog, rejecting invalid records and duplicate names.
    pub fn new(formulas: Vec<FormulaRecord>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for formula in &formulas {
            if !formula.is_valid() {
                return Err(FeedError::InvalidInput(format!(
                    "invalid formula record: {}",
                    formula.debug_string()
                )));
            }
            if !seen.insert(formula.key()) {
                return Err(FeedError::InvalidInput(format!(
                    "duplicate formula name: {}",
                    formula.name
                )));
            }
        }
        debug!(count = formulas.len(), "formula catalog built");
        Ok(Self { formulas })
    }

    /// The bundled enteral formula catalog.
    pub fn builtin() -> Self {
        Self {
            formulas: builtin_formulas(),
        }
    }

    /// Load a catalog from a JSON array of formula records.
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::new(load_formulas(path)?)
    }

    pub fn formulas(&self) -> &[FormulaRecord] {
        &self.formulas
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormulaRecord> {
        self.formulas.iter()
    }

    /// Get a formula by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FormulaRecord> {
        let key = name.trim().to_lowercase();
        self.formulas.iter().find(|f| f.key() == key)
    }

    /// Formulas whose name is similar to `name`, best match first.
    pub fn candidates(&self, name: &str) -> Vec<(&FormulaRecord, f64)> {
        let input = name.trim().to_lowercase();
        let mut candidates: Vec<(&FormulaRecord, f64)> = self
            .formulas
            .iter()
            .map(|f| (f, jaro_winkler(&f.key(), &input)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }

    /// Resolve a user-typed name: exact match first, then the closest fuzzy match.
    pub fn find(&self, name: &str) -> Result<&FormulaRecord> {
        if let Some(formula) = self.get(name) {
            return Ok(formula);
        }

        match self.candidates(name).first() {
            Some(&(formula, score)) => {
                debug!(input = name, matched = %formula.name, score, "fuzzy formula match");
                Ok(formula)
            }
            None => Err(FeedError::FormulaNotFound(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

impl Default for FormulaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = FormulaCatalog::builtin();
        assert_eq!(catalog.len(), 16);
        assert!(FormulaCatalog::new(catalog.formulas().to_vec()).is_ok());
    }

    #[test]
    fn test_get_case_insensitive() {
        let catalog = FormulaCatalog::builtin();
        assert!(catalog.get("jevity 1.2").is_some());
        assert!(catalog.get("PEPTAMEN").is_some());
        assert!(catalog.get("Ensure").is_none());
    }

    #[test]
    fn test_find_fuzzy() {
        let catalog = FormulaCatalog::builtin();
        assert_eq!(catalog.find("Pulmocar").unwrap().name, "Pulmocare");
        assert_eq!(catalog.find("glucerna 1.0").unwrap().name, "Glucerna 1.0");
        assert!(matches!(
            catalog.find("zzzz"),
            Err(FeedError::FormulaNotFound(_))
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let formulas = builtin_formulas();
        let mut doubled = formulas.clone();
        doubled.push(formulas[0].clone());
        assert!(FormulaCatalog::new(doubled).is_err());
    }
}
