use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::FormulaRecord;

/// Load formulas from a JSON array, keeping file order.
pub fn load_formulas<P: AsRef<Path>>(path: P) -> Result<Vec<FormulaRecord>> {
    let content = fs::read_to_string(path)?;
    let formulas: Vec<FormulaRecord> = serde_json::from_str(&content)?;
    Ok(formulas)
}

/// Save formulas as a pretty-printed JSON array.
pub fn save_formulas<P: AsRef<Path>>(path: P, formulas: &[FormulaRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(formulas)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::catalog::{builtin_formulas, FormulaCatalog};

    #[test]
    fn test_load_and_save_keeps_order() {
        let formulas = builtin_formulas();
        let file = NamedTempFile::new().unwrap();
        save_formulas(file.path(), &formulas).unwrap();

        let reloaded = load_formulas(file.path()).unwrap();
        assert_eq!(reloaded, formulas);
    }

    #[test]
    fn test_catalog_rejects_invalid_record() {
        let json = r#"[
            {"name": "Broken", "brand": "X", "caloriesPerMl": 0, "proteinPerMl": 0.04, "description": "", "indications": []}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(FormulaCatalog::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_catalog_from_minimal_json() {
        let json = r#"[
            {"name": "House Blend", "brand": "Clinic", "caloriesPerMl": 1.2, "proteinPerMl": 0.05, "description": "Kitchen-made blend"}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = FormulaCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("house blend").unwrap().indications.is_empty());
    }
}
