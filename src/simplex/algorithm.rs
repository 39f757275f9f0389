//! Implementation of the Nelder-Mead simplex method.
//!
//! Each iteration orders the `n + 1` vertices by objective value, then
//! replaces the worst vertex by reflection, expansion or contraction through
//! the centroid of the others, or shrinks the whole simplex toward the best
//! vertex when none of those improve.

use ndarray::Array1;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use super::config::NelderMeadConfig;
use super::convergence::ConvergenceStatus;

/// A scalar function to be minimized.
///
/// Evaluation never fails. Infeasible regions should be expressed as large
/// finite values, which the optimizer ranks like any other value.
pub trait Objective {
    /// Evaluate the objective at `x`.
    fn value(&self, x: &Array1<f64>) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&Array1<f64>) -> f64,
{
    fn value(&self, x: &Array1<f64>) -> f64 {
        self(x)
    }
}

/// Result of a Nelder-Mead minimization.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    /// Best vertex found
    pub point: Array1<f64>,

    /// Objective value at `point`
    pub value: f64,

    /// Number of iterations performed
    pub iterations: usize,

    /// Number of objective evaluations
    pub func_evals: usize,

    /// Why the iteration stopped
    pub status: ConvergenceStatus,
}

impl SimplexResult {
    /// Whether the simplex collapsed within tolerance before the iteration cap.
    pub fn converged(&self) -> bool {
        self.status.is_converged()
    }
}

impl fmt::Display for SimplexResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simplex Result:")?;
        writeln!(f, "  Status: {}", self.status.description())?;
        writeln!(f, "  Value: {:.6e}", self.value)?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Function evaluations: {}", self.func_evals)?;
        writeln!(f, "  Point: {:?}", self.point.to_vec())?;
        Ok(())
    }
}

/// A vertex of the simplex together with its objective value.
#[derive(Debug, Clone)]
struct Vertex {
    point: Array1<f64>,
    value: f64,
}

/// The Nelder-Mead optimizer.
#[derive(Debug, Clone, Default)]
pub struct NelderMead {
    /// Configuration options
    config: NelderMeadConfig,
}

impl NelderMead {
    /// Create a new optimizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new optimizer with the given configuration.
    pub fn with_config(config: NelderMeadConfig) -> Self {
        Self { config }
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance on the spread of vertex values.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the coordinate offset used to build the initial simplex.
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.config.initial_step = initial_step;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &NelderMeadConfig {
        &self.config
    }

    /// Minimize `objective` starting from `initial`.
    ///
    /// # Arguments
    ///
    /// * `objective` - The function to minimize
    /// * `initial` - The starting point; its length fixes the dimension
    ///
    /// # Returns
    ///
    /// * The best vertex found. Hitting the iteration cap is reported through
    ///   [`SimplexResult::status`], never as an error.
    pub fn minimize<O: Objective + ?Sized>(
        &self,
        objective: &O,
        initial: &Array1<f64>,
    ) -> SimplexResult {
        let n = initial.len();
        let mut func_evals = 0;
        let mut eval = |x: &Array1<f64>| {
            func_evals += 1;
            rank_value(objective.value(x))
        };

        // Initial simplex: the starting point plus one offset per coordinate.
        let mut simplex = Vec::with_capacity(n + 1);
        simplex.push(Vertex {
            point: initial.clone(),
            value: eval(initial),
        });
        for i in 0..n {
            let mut point = initial.clone();
            point[i] += self.config.initial_step;
            let value = eval(&point);
            simplex.push(Vertex { point, value });
        }

        let cfg = &self.config;
        let mut iterations = 0;
        let status = loop {
            simplex.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));

            let best = simplex[0].value;
            let worst = simplex[n].value;
            // Only values are compared, so vertices straddling the minimum
            // with equal values count as converged even when far apart.
            let status = ConvergenceStatus::check(
                best,
                worst,
                cfg.tolerance,
                iterations,
                cfg.max_iterations,
            );
            if status.is_terminated() || n == 0 {
                break status;
            }

            let centroid = centroid(&simplex[..n]);
            let worst_point = simplex[n].point.clone();
            let second_worst = simplex[n - 1].value;

            let reflected = &centroid + &((&centroid - &worst_point) * cfg.reflection);
            let reflected_value = eval(&reflected);

            if reflected_value < best {
                let expanded = &centroid + &((&reflected - &centroid) * cfg.expansion);
                let expanded_value = eval(&expanded);
                simplex[n] = if expanded_value < reflected_value {
                    Vertex {
                        point: expanded,
                        value: expanded_value,
                    }
                } else {
                    Vertex {
                        point: reflected,
                        value: reflected_value,
                    }
                };
            } else if reflected_value < second_worst {
                simplex[n] = Vertex {
                    point: reflected,
                    value: reflected_value,
                };
            } else {
                let contracted = &centroid + &((&worst_point - &centroid) * cfg.contraction);
                let contracted_value = eval(&contracted);
                if contracted_value < worst {
                    simplex[n] = Vertex {
                        point: contracted,
                        value: contracted_value,
                    };
                } else {
                    let best_point = simplex[0].point.clone();
                    for vertex in simplex.iter_mut().skip(1) {
                        let point = &best_point + &((&vertex.point - &best_point) * cfg.shrink);
                        vertex.value = eval(&point);
                        vertex.point = point;
                    }
                }
            }

            iterations += 1;
        };

        let best = simplex.swap_remove(0);
        debug!(
            iterations,
            func_evals,
            value = best.value,
            status = status.description(),
            "nelder-mead finished"
        );

        SimplexResult {
            point: best.point,
            value: best.value,
            iterations,
            func_evals,
            status,
        }
    }
}

/// Minimize `objective` from `initial` with the default configuration.
pub fn minimize<O: Objective + ?Sized>(objective: &O, initial: &Array1<f64>) -> SimplexResult {
    NelderMead::new().minimize(objective, initial)
}

/// NaN sorts as the worst possible value so the ordering stays total.
fn rank_value(value: f64) -> f64 {
    if value.is_nan() {
        f64::INFINITY
    } else {
        value
    }
}

fn centroid(vertices: &[Vertex]) -> Array1<f64> {
    let mut sum = Array1::zeros(vertices[0].point.len());
    for vertex in vertices {
        sum += &vertex.point;
    }
    sum / vertices.len() as f64
}
