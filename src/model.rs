//! Two-parameter log-logistic dose-response model.
//!
//! The curve is
//!
//! ```text
//! p(dose) = 1 / (1 + exp(slope * (ln(dose) - ln(ed50))))
//! ```
//!
//! which equals exactly 0.5 at `dose == ed50`. This module also provides the
//! binomial negative log-likelihood that the fitter minimizes.

use ndarray::{array, Array1};
use serde::Serialize;

use crate::data::DoseResponseData;
use crate::error::{Ld50Error, Result};

/// Predicted probabilities are clamped to `[PROBABILITY_CLAMP, 1 - PROBABILITY_CLAMP]`
/// before taking logarithms.
pub const PROBABILITY_CLAMP: f64 = 1e-9;

/// Parameters of the log-logistic curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParams {
    /// Steepness of the curve. Positive values give a curve decreasing in dose.
    pub slope: f64,
    /// Median effective dose, meaningful only when positive.
    pub ed50: f64,
}

impl ModelParams {
    pub fn new(slope: f64, ed50: f64) -> Self {
        Self { slope, ed50 }
    }

    /// Convert to the `[slope, ed50]` vector layout used by the optimizer.
    pub fn to_array(&self) -> Array1<f64> {
        array![self.slope, self.ed50]
    }

    /// Read parameters from a `[slope, ed50]` vector.
    pub fn from_array(x: &Array1<f64>) -> Result<Self> {
        if x.len() != 2 {
            return Err(Ld50Error::DimensionMismatch(format!(
                "Expected 2 model parameters, got {}",
                x.len()
            )));
        }
        Ok(Self::new(x[0], x[1]))
    }
}

/// Evaluate the log-logistic curve at `dose`.
///
/// Returns 0 when `dose <= 0` or `ed50 <= 0`, where the curve is undefined.
pub fn logistic_response(params: ModelParams, dose: f64) -> f64 {
    if dose <= 0.0 || params.ed50 <= 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + (params.slope * (dose.ln() - params.ed50.ln())).exp())
}

/// Binomial negative log-likelihood of `data` under `params`.
///
/// Rows with zero dose are skipped.
pub fn neg_log_likelihood(params: ModelParams, data: &DoseResponseData) -> f64 {
    data.observations()
        .iter()
        .filter(|obs| obs.dose > 0.0)
        .map(|obs| {
            let p = logistic_response(params, obs.dose)
                .clamp(PROBABILITY_CLAMP, 1.0 - PROBABILITY_CLAMP);
            let responders = obs.response as f64;
            let survivors = (obs.total - obs.response) as f64;
            -(responders * p.ln() + survivors * (1.0 - p).ln())
        })
        .sum()
}

/// Dose at which the model predicts the response proportion `p` (e.g. ED10, ED90).
///
/// Returns `None` when `p` lies outside `(0, 1)`, the slope is zero, `ed50`
/// is non-positive, or the result is not finite.
pub fn effective_dose(params: ModelParams, p: f64) -> Option<f64> {
    if !(p > 0.0 && p < 1.0) || params.slope == 0.0 || params.ed50 <= 0.0 {
        return None;
    }
    let log_dose = params.ed50.ln() + ((1.0 - p) / p).ln() / params.slope;
    let dose = log_dose.exp();
    (dose.is_finite() && dose > 0.0).then_some(dose)
}
