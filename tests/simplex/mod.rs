//! Tests for the Nelder-Mead optimizer on plain test functions.

use approx::assert_abs_diff_eq;
use ld50_rs::simplex::{minimize, ConvergenceStatus, NelderMead, NelderMeadConfig};
use ndarray::{array, Array1};

fn shifted_bowl(x: &Array1<f64>) -> f64 {
    (x[0] - 3.0).powi(2) + (x[1] + 4.0).powi(2)
}

#[test]
fn test_convex_bowl_from_many_starts() {
    let starts = [
        array![0.0, 0.0],
        array![-25.0, 40.0],
        array![3.0, -4.5],
        array![100.0, -100.0],
        array![-0.3, 7.7],
    ];
    for start in &starts {
        let result = minimize(&shifted_bowl, start);
        assert!(result.converged(), "no convergence from {:?}", start);
        assert_abs_diff_eq!(result.point[0], 3.0, epsilon = 1e-2);
        assert_abs_diff_eq!(result.point[1], -4.0, epsilon = 1e-2);
    }
}

#[test]
fn test_default_configuration() {
    let config = NelderMeadConfig::default();
    assert_eq!(config.max_iterations, 2000);
    assert_eq!(config.tolerance, 1e-6);
    assert_eq!(config.initial_step, 0.1);
}

#[test]
fn test_rosenbrock() {
    let rosenbrock = |x: &Array1<f64>| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
    let result = NelderMead::new()
        .with_max_iterations(10_000)
        .with_tolerance(1e-12)
        .minimize(&rosenbrock, &array![-1.2, 1.0]);

    assert_abs_diff_eq!(result.point[0], 1.0, epsilon = 1e-2);
    assert_abs_diff_eq!(result.point[1], 1.0, epsilon = 2e-2);
}

#[test]
fn test_three_dimensional() {
    let f = |x: &Array1<f64>| {
        (x[0] - 1.0).powi(2) + 2.0 * (x[1] - 2.0).powi(2) + 3.0 * (x[2] + 1.0).powi(2)
    };
    let result = NelderMead::new()
        .with_tolerance(1e-10)
        .minimize(&f, &array![0.0, 0.0, 0.0]);

    assert_eq!(result.point.len(), 3);
    assert_abs_diff_eq!(result.point[0], 1.0, epsilon = 1e-2);
    assert_abs_diff_eq!(result.point[1], 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(result.point[2], -1.0, epsilon = 1e-2);
}

#[test]
fn test_non_convergence_returns_best_so_far() {
    // Unbounded below: the simplex keeps expanding until the cap.
    let f = |x: &Array1<f64>| x[0] + x[1];
    let result = NelderMead::new()
        .with_max_iterations(50)
        .minimize(&f, &array![0.0, 0.0]);

    assert_eq!(result.status, ConvergenceStatus::MaxIterationsReached);
    assert_eq!(result.iterations, 50);
    assert!(result.value < 0.0);
    assert_eq!(result.value, f(&result.point));
}

#[test]
fn test_objective_trait_object() {
    use ld50_rs::simplex::Objective;

    struct Offset(f64);
    impl Objective for Offset {
        fn value(&self, x: &Array1<f64>) -> f64 {
            (x[0] - self.0).powi(2)
        }
    }

    let objective: Box<dyn Objective> = Box::new(Offset(-2.5));
    let result = minimize(objective.as_ref(), &array![-2.5]);
    assert!(result.converged());
    assert_eq!(result.point[0], -2.5);
    assert_eq!(result.value, objective.value(&result.point));
}

#[test]
fn test_one_dimensional_stop_depends_on_values_only() {
    // Starting at 4.0 the two vertices end up on either side of -2.5 with
    // equal values, which satisfies the tolerance before the point is exact.
    let f = |x: &Array1<f64>| (x[0] + 2.5).powi(2);
    let result = minimize(&f, &array![4.0]);

    assert!(result.converged());
    assert!(result.value < 1e-6 || (result.point[0] + 2.5).abs() <= 0.5);
    assert!(result.value < f(&array![4.0]));
}
