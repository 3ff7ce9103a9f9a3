use crate::models::FormulaRecord;

#[allow(clippy::too_many_arguments)]
fn formula(
    name: &str,
    brand: &str,
    calories_per_ml: f64,
    protein_per_ml: f64,
    description: &str,
    indications: &[&str],
    osmolality: f64,
    fiber_content: &str,
    special_features: &[&str],
) -> FormulaRecord {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    FormulaRecord {
        name: name.to_string(),
        brand: brand.to_string(),
        calories_per_ml,
        protein_per_ml,
        description: description.to_string(),
        indications: strings(indications),
        osmolality: Some(osmolality),
        fiber_content: Some(fiber_content.to_string()),
        special_features: Some(strings(special_features)),
    }
}

/// Enteral (tube feeding) formulas bundled with the calculator.
pub fn builtin_formulas() -> Vec<FormulaRecord> {
    vec![
        // Kate Farms plant-based formulas
        formula(
            "Kate Farms Standard 1.0",
            "Kate Farms",
            1.0,
            0.035,
            "Plant-based, organic enteral formula with pea protein",
            &["General nutrition", "Plant-based nutrition", "Dairy intolerance"],
            375.0,
            "7g per 325mL",
            &["Plant-based", "Organic", "Non-GMO", "Dairy-free", "Soy-free"],
        ),
        formula(
            "Kate Farms Standard 1.5",
            "Kate Farms",
            1.5,
            0.045,
            "Higher calorie plant-based enteral formula",
            &["Increased caloric needs", "Fluid restriction", "Weight gain"],
            490.0,
            "7g per 325mL",
            &["Plant-based", "High calorie", "Organic", "Dairy-free"],
        ),
        formula(
            "Kate Farms Peptide 1.5",
            "Kate Farms",
            1.5,
            0.056,
            "Plant-based peptide formula for enhanced absorption",
            &["Malabsorption", "GI compromise", "Critical care"],
            450.0,
            "Fiber-free",
            &["Plant-based peptides", "Easy absorption", "Organic"],
        ),
        // Abbott
        formula(
            "Jevity 1.0",
            "Abbott",
            1.0,
            0.04,
            "Standard fiber-containing enteral formula",
            &["General nutrition", "Long-term feeding", "GI tolerance"],
            300.0,
            "14g per 1000mL",
            &["Fiber-containing", "Lactose-free", "Gluten-free"],
        ),
        formula(
            "Jevity 1.2",
            "Abbott",
            1.2,
            0.056,
            "Higher calorie fiber-containing enteral formula",
            &["Increased caloric needs", "Fluid restriction"],
            390.0,
            "14g per 1000mL",
            &["High calorie", "Fiber-containing", "Lactose-free"],
        ),
        formula(
            "Osmolite 1.0",
            "Abbott",
            1.0,
            0.04,
            "Standard isotonic enteral formula without fiber",
            &["GI intolerance", "Post-surgical", "Critical care"],
            300.0,
            "Fiber-free",
            &["Isotonic", "Fiber-free", "Easy to digest"],
        ),
        formula(
            "Osmolite 1.2",
            "Abbott",
            1.2,
            0.044,
            "Higher calorie isotonic enteral formula",
            &["Increased caloric needs", "Fluid restriction", "Critical care"],
            360.0,
            "Fiber-free",
            &["High calorie", "Isotonic", "Concentrated nutrition"],
        ),
        formula(
            "Glucerna 1.0",
            "Abbott",
            1.0,
            0.042,
            "Diabetes-specific enteral formula with modified carbohydrates",
            &["Diabetes", "Glucose intolerance", "Metabolic syndrome"],
            355.0,
            "15g per 1000mL",
            &["Diabetes-specific", "Slow-release carbs", "High fiber"],
        ),
        formula(
            "Pulmocare",
            "Abbott",
            1.5,
            0.063,
            "High-fat, low-carb enteral formula for respiratory patients",
            &["COPD", "Respiratory failure", "Ventilator patients"],
            475.0,
            "Fiber-free",
            &["High fat", "Low CO2 production", "Concentrated"],
        ),
        formula(
            "Nepro",
            "Abbott",
            2.0,
            0.081,
            "Renal enteral formula with modified protein and electrolytes",
            &["Chronic kidney disease", "Dialysis", "Renal insufficiency"],
            665.0,
            "Fiber-free",
            &["Renal-specific", "High calorie", "Modified electrolytes"],
        ),
        // Nestlé Health Science
        formula(
            "Vivonex T.E.N.",
            "Nestlé",
            1.0,
            0.038,
            "Elemental enteral formula with free amino acids",
            &["Malabsorption", "Crohn's disease", "Short gut syndrome"],
            630.0,
            "Fiber-free",
            &["Elemental", "Pre-digested", "Hypoallergenic"],
        ),
        formula(
            "Peptamen",
            "Nestlé",
            1.0,
            0.04,
            "Semi-elemental enteral formula with peptides",
            &["Maldigestion", "Pancreatitis", "IBD"],
            270.0,
            "Fiber-free",
            &["Semi-elemental", "Easy absorption", "MCT oil"],
        ),
        formula(
            "Impact",
            "Nestlé",
            1.0,
            0.056,
            "Immune-enhancing enteral formula with arginine, omega-3, nucleotides",
            &["Surgery", "Trauma", "Immune compromise"],
            375.0,
            "Fiber-free",
            &["Immune-enhancing", "Arginine", "Omega-3 fatty acids"],
        ),
        // Whole food blends
        formula(
            "Real Food Blends",
            "Real Food Blends",
            1.0,
            0.04,
            "Whole food enteral formula made from real ingredients",
            &["Whole food nutrition", "Food allergies", "Natural feeding"],
            300.0,
            "Natural fiber from whole foods",
            &["Whole food", "No artificial ingredients", "Allergen-friendly"],
        ),
        formula(
            "Liquid Hope",
            "Functional Formularies",
            1.0,
            0.04,
            "Organic whole food enteral formula",
            &["Whole food nutrition", "Organic feeding", "Food sensitivities"],
            300.0,
            "Natural fiber from whole foods",
            &["Organic", "Whole food", "Non-GMO", "Shelf-stable"],
        ),
        // Nutricia
        formula(
            "Nutrison",
            "Nutricia",
            1.0,
            0.04,
            "Standard enteral formula for tube feeding",
            &["General nutrition", "Long-term feeding"],
            285.0,
            "Fiber-free",
            &["Lactose-free", "Gluten-free", "Standard formula"],
        ),
    ]
}
