//! Maximum-likelihood fitting of the log-logistic model.
//!
//! The fitter picks a starting point from the observed proportions, wraps the
//! binomial negative log-likelihood in a penalized objective and hands it to
//! the Nelder-Mead optimizer.

use ndarray::Array1;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

use crate::data::DoseResponseData;
use crate::error::{Ld50Error, Result};
use crate::model::{self, neg_log_likelihood, ModelParams};
use crate::simplex::{NelderMead, NelderMeadConfig};

/// Objective value returned for candidates with `ed50 <= 0`.
///
/// The optimizer is unconstrained; positivity of `ed50` is enforced only by
/// this penalty in the objective.
pub const INFEASIBLE_PENALTY: f64 = 1e9;

/// Minimum number of observations accepted by [`Fitter::fit`].
pub const MIN_OBSERVATIONS: usize = 3;

/// Configuration for the fitter.
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Starting slope. Default: 1.0
    pub initial_slope: f64,

    /// Starting ed50 used when the heuristic guess is not positive. Default: 0.1
    pub fallback_ed50: f64,

    /// Optimizer settings
    pub optimizer: NelderMeadConfig,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            initial_slope: 1.0,
            fallback_ed50: 0.1,
            optimizer: NelderMeadConfig::default(),
        }
    }
}

/// Result of a dose-response fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    /// Fitted slope
    pub slope: f64,

    /// Fitted median effective dose
    pub ed50: f64,

    /// Objective value at the solution
    pub neg_log_likelihood: f64,

    /// Optimizer iterations
    pub iterations: usize,

    /// Objective evaluations
    pub func_evals: usize,

    /// Whether the simplex converged before the iteration cap
    pub converged: bool,
}

impl FitResult {
    pub fn params(&self) -> ModelParams {
        ModelParams::new(self.slope, self.ed50)
    }

    /// Predicted response proportion at `dose`.
    pub fn predict(&self, dose: f64) -> f64 {
        model::logistic_response(self.params(), dose)
    }

    /// Dose at which the fitted curve reaches proportion `p`.
    pub fn effective_dose(&self, p: f64) -> Option<f64> {
        model::effective_dose(self.params(), p)
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit Result:")?;
        writeln!(f, "  Slope: {:.6}", self.slope)?;
        writeln!(f, "  ED50: {:.6}", self.ed50)?;
        writeln!(
            f,
            "  Negative log-likelihood: {:.6}",
            self.neg_log_likelihood
        )?;
        writeln!(f, "  Converged: {}", self.converged)?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        Ok(())
    }
}

/// Fits the log-logistic model by maximum likelihood.
#[derive(Debug, Clone, Default)]
pub struct Fitter {
    config: FitConfig,
}

impl Fitter {
    /// Create a fitter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fitter with the given configuration.
    pub fn with_config(config: FitConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fit `data`, requiring at least [`MIN_OBSERVATIONS`] rows.
    pub fn fit(&self, data: &DoseResponseData) -> Result<FitResult> {
        if data.len() < MIN_OBSERVATIONS {
            return Err(Ld50Error::InsufficientData {
                required: MIN_OBSERVATIONS,
                found: data.len(),
            });
        }
        Ok(self.fit_unchecked(data))
    }

    /// Fit without the size check. Poor data yields a poor fit, never an error.
    pub(crate) fn fit_unchecked(&self, data: &DoseResponseData) -> FitResult {
        let start = initial_guess(data, &self.config);
        trace!(slope = start.slope, ed50 = start.ed50, "initial guess");

        let objective = penalized_objective(data);
        let result = NelderMead::with_config(self.config.optimizer.clone())
            .minimize(&objective, &start.to_array());

        let fit = FitResult {
            slope: result.point[0],
            ed50: result.point[1],
            neg_log_likelihood: result.value,
            iterations: result.iterations,
            func_evals: result.func_evals,
            converged: result.converged(),
        };
        debug!(
            slope = fit.slope,
            ed50 = fit.ed50,
            nll = fit.neg_log_likelihood,
            converged = fit.converged,
            "fit complete"
        );
        fit
    }
}

/// Fit `data` with the default configuration.
pub fn fit(data: &DoseResponseData) -> Result<FitResult> {
    Fitter::new().fit(data)
}

/// Starting point for the optimizer.
///
/// The ed50 guess is the dose whose observed proportion is closest to 0.5,
/// falling back to the median positive dose, and finally to
/// `config.fallback_ed50` when the guess is not positive.
pub fn initial_guess(data: &DoseResponseData, config: &FitConfig) -> ModelParams {
    let closest = data
        .observations()
        .iter()
        .map(|obs| (obs.dose, (obs.proportion() - 0.5).abs()))
        .filter(|(_, distance)| distance.is_finite())
        .fold(None, |best: Option<(f64, f64)>, candidate| match best {
            Some(b) if b.1 <= candidate.1 => Some(b),
            _ => Some(candidate),
        })
        .map(|(dose, _)| dose);

    let guess = closest.unwrap_or_else(|| median_positive_dose(data));
    let ed50 = if guess > 0.0 {
        guess
    } else {
        config.fallback_ed50
    };

    ModelParams::new(config.initial_slope, ed50)
}

/// Negative log-likelihood of `data`, or [`INFEASIBLE_PENALTY`] when `ed50 <= 0`.
pub fn penalized_objective(data: &DoseResponseData) -> impl Fn(&Array1<f64>) -> f64 + '_ {
    move |x: &Array1<f64>| {
        let params = ModelParams::new(x[0], x[1]);
        if params.ed50 <= 0.0 {
            INFEASIBLE_PENALTY
        } else {
            neg_log_likelihood(params, data)
        }
    }
}

fn median_positive_dose(data: &DoseResponseData) -> f64 {
    let mut doses: Vec<f64> = data.doses().into_iter().filter(|&d| d > 0.0).collect();
    if doses.is_empty() {
        return 0.0;
    }
    doses.sort_by(f64::total_cmp);
    let mid = doses.len() / 2;
    if doses.len() % 2 == 0 {
        (doses[mid - 1] + doses[mid]) / 2.0
    } else {
        doses[mid]
    }
}
