use crate::matcher::constants::*;
use crate::models::FormulaRecord;

/// A test over a catalog record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordPredicate {
    /// Brand equals (case-insensitive).
    Brand(&'static str),
    /// Some indication contains one of the terms.
    Indication(&'static [&'static str]),
    /// Some special feature, or the description, contains one of the terms.
    Feature(&'static [&'static str]),
    CaloriesAtLeast(f64),
    ProteinAtLeast(f64),
    OsmolalityAtMost(f64),
    ContainsFiber,
    FiberFree,
}

fn any_contains(haystack: &[String], terms: &[&str]) -> bool {
    haystack.iter().any(|item| {
        let item = item.to_lowercase();
        terms.iter().any(|t| item.contains(t))
    })
}

impl RecordPredicate {
    /// Terms are expected in lowercase.
    pub fn matches(&self, formula: &FormulaRecord) -> bool {
        match *self {
            RecordPredicate::Brand(brand) => formula.brand.to_lowercase() == brand.to_lowercase(),
            RecordPredicate::Indication(terms) => any_contains(&formula.indications, terms),
            RecordPredicate::Feature(terms) => {
                let description = formula.description.to_lowercase();
                any_contains(formula.features(), terms)
                    || terms.iter().any(|t| description.contains(t))
            }
            RecordPredicate::CaloriesAtLeast(min) => formula.calories_per_ml >= min,
            RecordPredicate::ProteinAtLeast(min) => formula.protein_per_ml >= min,
            RecordPredicate::OsmolalityAtMost(max) => formula.osmolality.is_some_and(|o| o <= max),
            RecordPredicate::ContainsFiber => formula.contains_fiber(),
            RecordPredicate::FiberFree => formula.is_fiber_free(),
        }
    }
}

/// One scoring rule: if the query mentions any keyword (and none of the
/// excludes), every record passing the predicate gains `priority`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub excludes: &'static [&'static str],
    pub priority: u32,
    pub predicate: RecordPredicate,
}

impl MatchRule {
    /// `query` must already be trimmed and lowercased.
    pub fn applies_to(&self, query: &str) -> bool {
        self.keywords.iter().any(|k| query.contains(k))
            && !self.excludes.iter().any(|k| query.contains(k))
    }
}

/// Phase-1 rules in evaluation order.
pub static MATCH_RULES: &[MatchRule] = &[
    // Brands
    MatchRule {
        label: "Kate Farms",
        keywords: &["kate farms", "kate"],
        excludes: &[],
        priority: PRIORITY_BRAND,
        predicate: RecordPredicate::Brand("Kate Farms"),
    },
    MatchRule {
        label: "Abbott",
        keywords: &["abbott"],
        excludes: &[],
        priority: PRIORITY_BRAND,
        predicate: RecordPredicate::Brand("Abbott"),
    },
    MatchRule {
        label: "Nestlé",
        keywords: &["nestlé", "nestle"],
        excludes: &[],
        priority: PRIORITY_BRAND,
        predicate: RecordPredicate::Brand("Nestlé"),
    },
    MatchRule {
        label: "Real Food Blends",
        keywords: &["real food blends"],
        excludes: &[],
        priority: PRIORITY_BRAND,
        predicate: RecordPredicate::Brand("Real Food Blends"),
    },
    MatchRule {
        label: "Functional Formularies",
        keywords: &["functional formularies"],
        excludes: &[],
        priority: PRIORITY_BRAND,
        predicate: RecordPredicate::Brand("Functional Formularies"),
    },
    MatchRule {
        label: "Nutricia",
        keywords: &["nutricia", "danone"],
        excludes: &[],
        priority: PRIORITY_BRAND,
        predicate: RecordPredicate::Brand("Nutricia"),
    },
    // Conditions
    MatchRule {
        label: "diabetes",
        keywords: &["diabet", "glucose", "blood sugar", "insulin"],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&["diabetes", "glucose"]),
    },
    MatchRule {
        label: "respiratory",
        keywords: &["copd", "respiratory", "pulmonary", "lung", "ventilator"],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&["copd", "respiratory", "ventilator"]),
    },
    MatchRule {
        label: "renal",
        keywords: &["kidney", "renal", "dialysis", "ckd"],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&["kidney", "renal", "dialysis"]),
    },
    MatchRule {
        label: "malabsorption",
        keywords: &[
            "malabsorption",
            "maldigestion",
            "crohn",
            "ibd",
            "pancrea",
            "short gut",
            "short bowel",
        ],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&[
            "malabsorption",
            "maldigestion",
            "crohn",
            "ibd",
            "pancreatitis",
            "short gut",
            "gi compromise",
        ]),
    },
    MatchRule {
        label: "surgery",
        keywords: &["surgery", "surgical", "trauma", "immune", "wound"],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&["surgery", "surgical", "trauma", "immune"]),
    },
    MatchRule {
        label: "critical care",
        keywords: &["critical care", "critically ill", "intensive care"],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&["critical care"]),
    },
    MatchRule {
        label: "allergy",
        keywords: &["allerg", "intolerance", "sensitivit"],
        excludes: &[],
        priority: PRIORITY_CONDITION,
        predicate: RecordPredicate::Indication(&["allergies", "dairy intolerance", "sensitivities"]),
    },
    // Features
    MatchRule {
        label: "plant-based",
        keywords: &["plant", "organic", "vegan", "pea protein"],
        excludes: &[],
        priority: PRIORITY_FEATURE,
        predicate: RecordPredicate::Feature(&["plant-based", "organic"]),
    },
    MatchRule {
        label: "elemental",
        keywords: &["elemental", "amino acid", "pre-digested", "predigested"],
        excludes: &[],
        priority: PRIORITY_FEATURE,
        predicate: RecordPredicate::Feature(&["elemental", "pre-digested"]),
    },
    MatchRule {
        label: "peptide",
        keywords: &["peptide"],
        excludes: &[],
        priority: PRIORITY_FEATURE,
        predicate: RecordPredicate::Feature(&["peptide", "semi-elemental"]),
    },
    MatchRule {
        label: "whole food",
        keywords: &["whole food", "real food", "blenderized"],
        // The brand rule already covers this exact phrase
        excludes: &["real food blends"],
        priority: PRIORITY_FEATURE,
        predicate: RecordPredicate::Feature(&["whole food"]),
    },
    // Calorie, fiber and protein attributes
    MatchRule {
        label: "high calorie",
        keywords: &[
            "high calorie",
            "high-calorie",
            "calorie dense",
            "calorie-dense",
            "concentrated",
            "fluid restriction",
            "weight gain",
        ],
        excludes: &[],
        priority: PRIORITY_ATTRIBUTE,
        predicate: RecordPredicate::CaloriesAtLeast(HIGH_CALORIE_PER_ML),
    },
    MatchRule {
        label: "fiber",
        keywords: &["fiber", "fibre"],
        excludes: &[
            "fiber-free",
            "fiber free",
            "fibre-free",
            "fibre free",
            "without fib",
            "no fib",
        ],
        priority: PRIORITY_ATTRIBUTE,
        predicate: RecordPredicate::ContainsFiber,
    },
    MatchRule {
        label: "fiber-free",
        keywords: &[
            "fiber-free",
            "fiber free",
            "fibre-free",
            "fibre free",
            "without fiber",
            "no fiber",
            "low residue",
        ],
        excludes: &[],
        priority: PRIORITY_ATTRIBUTE,
        predicate: RecordPredicate::FiberFree,
    },
    MatchRule {
        label: "high protein",
        keywords: &["high protein", "high-protein"],
        excludes: &[],
        priority: PRIORITY_ATTRIBUTE,
        predicate: RecordPredicate::ProteinAtLeast(HIGH_PROTEIN_PER_ML),
    },
    // Tolerance and standard formulas
    MatchRule {
        label: "isotonic",
        keywords: &["isotonic", "low osmolality"],
        excludes: &[],
        priority: PRIORITY_TOLERANCE,
        predicate: RecordPredicate::OsmolalityAtMost(ISOTONIC_MAX_OSMOLALITY),
    },
    MatchRule {
        label: "lactose-free",
        keywords: &["lactose"],
        excludes: &[],
        priority: PRIORITY_TOLERANCE,
        predicate: RecordPredicate::Feature(&["lactose-free"]),
    },
    MatchRule {
        label: "gluten-free",
        keywords: &["gluten"],
        excludes: &[],
        priority: PRIORITY_TOLERANCE,
        predicate: RecordPredicate::Feature(&["gluten-free"]),
    },
    MatchRule {
        label: "dairy-free",
        keywords: &["dairy-free", "dairy free", "no dairy", "without dairy"],
        excludes: &[],
        priority: PRIORITY_TOLERANCE,
        predicate: RecordPredicate::Feature(&["dairy-free"]),
    },
    MatchRule {
        label: "soy-free",
        keywords: &["soy-free", "soy free", "no soy", "without soy"],
        excludes: &[],
        priority: PRIORITY_TOLERANCE,
        predicate: RecordPredicate::Feature(&["soy-free"]),
    },
    MatchRule {
        label: "standard",
        keywords: &["standard", "general", "routine", "long-term", "long term"],
        excludes: &[],
        priority: PRIORITY_STANDARD,
        predicate: RecordPredicate::Indication(&["general nutrition", "long-term feeding"]),
    },
];
