//! End-to-end scenario: CSV table in, fit and bootstrap interval out.

use ld50_rs::{bootstrap_interval, fit, DoseResponseData, Ld50Error};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;

const TABLE: &str = "dose,response,total\n1,0,20\n2,3,20\n4,10,20\n8,17,20\n16,20,20\n";

#[test]
fn test_csv_fit_and_bootstrap() {
    let data = DoseResponseData::from_csv_str(TABLE).unwrap();
    assert_eq!(data.len(), 5);

    let result = fit(&data).unwrap();
    assert!(
        result.ed50 > 2.0 && result.ed50 < 8.0,
        "ed50 = {}",
        result.ed50
    );
    // Response rises with dose, so the fitted slope is negative.
    assert!(result.slope < 0.0, "slope = {}", result.slope);

    let mut rng = ChaCha8Rng::seed_from_u64(20240601);
    let ci = bootstrap_interval(&data, 1000, &mut rng).unwrap();
    assert!(ci.is_defined());
    assert!(
        ci.lower < result.ed50 && result.ed50 < ci.upper,
        "{} vs {}",
        result.ed50,
        ci
    );
}

#[test]
fn test_csv_from_file() {
    let path = std::env::temp_dir().join(format!("ld50-rs-e2e-{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
    }

    let data = DoseResponseData::from_csv_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(data, DoseResponseData::from_csv_str(TABLE).unwrap());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = DoseResponseData::from_csv_path("/nonexistent/ld50-rs/table.csv").unwrap_err();
    assert!(matches!(err, Ld50Error::Io(_)));
}

#[test]
fn test_too_few_rows_is_rejected() {
    let data = DoseResponseData::from_csv_str("dose,response,total\n1,0,20\n2,3,20\n").unwrap();
    assert!(matches!(fit(&data), Err(Ld50Error::InsufficientData { .. })));

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(bootstrap_interval(&data, 10, &mut rng).is_err());
}

#[test]
fn test_result_serializes_to_json() {
    let data = DoseResponseData::from_csv_str(TABLE).unwrap();
    let result = fit(&data).unwrap();
    let json = serde_json::to_value(result).unwrap();
    assert!(json["ed50"].as_f64().is_some());
    assert!(json["slope"].as_f64().unwrap() < 0.0);

    let undefined = serde_json::to_value(ld50_rs::ConfidenceInterval::undefined()).unwrap();
    assert!(undefined["lower"].is_null());
}
