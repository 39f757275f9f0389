//! Tests for maximum-likelihood fitting on synthetic studies.

use crate::test_helpers::{approx_eq, expected_counts, STUDY_DOSES};
use ld50_rs::fit::{initial_guess, FitConfig};
use ld50_rs::{fit, neg_log_likelihood, DoseResponseData, Fitter, Ld50Error, ModelParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_recovers_known_parameters() {
    let truth = ModelParams::new(2.0, 5.0);
    let data = expected_counts(truth, &STUDY_DOSES, 100);

    let result = fit(&data).unwrap();

    assert!(result.slope > 0.0, "slope = {}", result.slope);
    assert!(
        approx_eq(result.ed50, truth.ed50, 0.1 * truth.ed50),
        "ed50 = {}",
        result.ed50
    );
    assert!(approx_eq(result.slope, truth.slope, 0.3));
    assert!(result.converged);
}

#[test]
fn test_recovers_parameters_from_simulated_counts() {
    let truth = ModelParams::new(2.0, 5.0);
    let mut rng = ChaCha8Rng::seed_from_u64(123);
    let data = DoseResponseData::simulate(truth, &STUDY_DOSES, 500, &mut rng).unwrap();

    let result = fit(&data).unwrap();

    assert!(result.slope > 0.0);
    assert!(
        approx_eq(result.ed50, truth.ed50, 0.1 * truth.ed50),
        "ed50 = {}",
        result.ed50
    );
}

#[test]
fn test_fit_beats_truth_and_start() {
    let truth = ModelParams::new(2.0, 5.0);
    let data = expected_counts(truth, &STUDY_DOSES, 100);
    let start = initial_guess(&data, &FitConfig::default());

    let result = fit(&data).unwrap();

    assert!(
        result.neg_log_likelihood <= neg_log_likelihood(truth, &data) + 1e-3
    );
    assert!(result.neg_log_likelihood < neg_log_likelihood(start, &data));
    assert!(approx_eq(
        result.neg_log_likelihood,
        neg_log_likelihood(result.params(), &data),
        1e-9
    ));
}

#[test]
fn test_decreasing_and_increasing_curves_share_ed50() {
    let down = expected_counts(ModelParams::new(2.0, 5.0), &STUDY_DOSES, 100);
    let up = expected_counts(ModelParams::new(-2.0, 5.0), &STUDY_DOSES, 100);

    let down_fit = fit(&down).unwrap();
    let up_fit = fit(&up).unwrap();

    assert!(down_fit.slope > 0.0);
    assert!(up_fit.slope < 0.0);
    assert!(approx_eq(down_fit.ed50, up_fit.ed50, 0.25));
}

#[test]
fn test_zero_dose_control_rows_are_ignored() {
    let truth = ModelParams::new(2.0, 5.0);
    let data = expected_counts(truth, &STUDY_DOSES, 100);
    let mut observations = data.observations().to_vec();
    observations.insert(0, ld50_rs::Observation::new(0.0, 3, 100).unwrap());
    let with_control = DoseResponseData::from_observations(observations).unwrap();

    let a = fit(&data).unwrap();
    let b = fit(&with_control).unwrap();

    assert!(approx_eq(a.ed50, b.ed50, 1e-9));
    assert!(approx_eq(a.slope, b.slope, 1e-9));
}

#[test]
fn test_effective_dose_brackets_ed50() {
    let data = expected_counts(ModelParams::new(2.0, 5.0), &STUDY_DOSES, 100);
    let result = fit(&data).unwrap();

    let ed10 = result.effective_dose(0.1).unwrap();
    let ed90 = result.effective_dose(0.9).unwrap();
    // Decreasing curve: a 90% response happens at a lower dose than 10%.
    assert!(ed90 < result.ed50 && result.ed50 < ed10);
    assert!(
        approx_eq(result.effective_dose(0.5).unwrap(), result.ed50, 1e-9)
    );
}

#[test]
fn test_small_inputs() {
    let two = DoseResponseData::new(&[1.0, 2.0], &[1, 2], &[4, 4]).unwrap();
    assert!(matches!(
        Fitter::new().fit(&two),
        Err(Ld50Error::InsufficientData { required: 3, found: 2 })
    ));

    let three = DoseResponseData::new(&[1.0, 2.0, 3.0], &[4, 4, 4], &[4, 4, 4]).unwrap();
    let result = Fitter::new().fit(&three).unwrap();
    assert!(!result.ed50.is_nan());
}
