use chrono::Utc;
use tempfile::TempDir;

use tube_feed_calc_rs::calculator::FeedCalculator;
use tube_feed_calc_rs::catalog::FormulaCatalog;
use tube_feed_calc_rs::error::FeedError;
use tube_feed_calc_rs::matcher::{search, search_and_record, MAX_RESULTS};
use tube_feed_calc_rs::usage::{compute_stats, export_csv, export_json, JsonFileEventLog};

#[test]
fn test_search_contract() {
    let catalog = FormulaCatalog::builtin();

    assert!(matches!(search("", catalog.formulas()), Err(FeedError::EmptyQuery)));
    assert!(matches!(search("   ", catalog.formulas()), Err(FeedError::EmptyQuery)));

    let kate: Vec<&str> = search("Kate Farms", catalog.formulas())
        .unwrap()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(
        kate,
        vec![
            "Kate Farms Standard 1.0",
            "Kate Farms Standard 1.5",
            "Kate Farms Peptide 1.5",
        ]
    );

    assert!(search("xyzzynotfound", catalog.formulas()).unwrap().is_empty());

    for query in ["formula", "enteral", "high calorie fiber", "plant", "a"] {
        assert!(search(query, catalog.formulas()).unwrap().len() <= MAX_RESULTS);
    }
}

#[test]
fn test_session_logs_to_file_and_exports() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("log.json");
    let mut sink = JsonFileEventLog::new(&log_path);

    let catalog = FormulaCatalog::builtin();
    let mut calculator = FeedCalculator::with_session("session-test");

    let results =
        search_and_record("diabetes", catalog.formulas(), &mut sink, calculator.session_id()).unwrap();
    assert_eq!(results[0].name, "Glucerna 1.0");
    calculator.attach_formula(results[0].clone());

    calculator.enter_volume("1000");
    calculator.enter_hours("");
    calculator.enter_rate("50");
    let result = calculator.calculate(&mut sink).unwrap();
    assert_eq!(calculator.field(tube_feed_calc_rs::models::FeedField::Hours), "20.00 hours");
    assert!(result.nutrition.is_some());

    // Second calculation in the same session without a formula
    calculator.reset();
    calculator.enter_volume("240");
    calculator.enter_hours("2");
    calculator.calculate(&mut sink).unwrap();

    let log = sink.load().unwrap();
    assert_eq!(log.calculations.len(), 2);
    assert_eq!(log.searches.len(), 1);
    assert!(log.calculations.iter().all(|c| c.session_id == "session-test"));

    let stats = compute_stats(&log, 7, Utc::now());
    assert_eq!(stats.total_calculations, 2);
    assert_eq!(stats.total_searches, 1);
    assert_eq!(stats.popular_formulas.get("Glucerna 1.0"), Some(&1));

    let json_path = dir.path().join("export.json");
    export_json(&log, &json_path, Utc::now()).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(exported["totalCalculations"], 2);

    let csv_path = dir.path().join("export.csv");
    export_csv(&log, &csv_path).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(reader.records().count(), 2);

    sink.clear_calculations().unwrap();
    let cleared = sink.load().unwrap();
    assert!(cleared.calculations.is_empty());
    assert_eq!(cleared.searches.len(), 1);
}
