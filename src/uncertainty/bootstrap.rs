//! # Bootstrap Resampling for the Median Effective Dose
//!
//! Each trial resamples the dataset with replacement, refits it and yields
//! either an ed50 estimate or a discard marker. Trials share nothing but
//! read-only access to the original dataset: every trial owns a random
//! generator seeded from a value drawn up-front from the caller's source, so
//! sequential and parallel execution produce identical results for the same
//! caller seed. Aggregation into a percentile interval happens only after
//! every trial has finished.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, warn};

use super::confidence::{percentile_interval, ConfidenceInterval};
use crate::data::DoseResponseData;
use crate::error::{Ld50Error, Result};
use crate::fit::{FitConfig, Fitter, MIN_OBSERVATIONS};

/// Number of bootstrap trials used when the caller does not choose one.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Fewer usable estimates than this yield the undefined interval.
pub const MIN_SUCCESSFUL_TRIALS: usize = 50;

/// Configuration for the bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resampling trials. Default: 1000
    pub iterations: usize,

    /// Minimum number of usable estimates for a defined interval. Default: 50
    pub min_successes: usize,

    /// Lower percentile of the interval. Default: 0.025
    pub lower_quantile: f64,

    /// Upper percentile of the interval. Default: 0.975
    pub upper_quantile: f64,

    /// Run trials on the rayon pool when the `parallel` feature is enabled. Default: true
    pub parallel: bool,

    /// Fitter settings applied to every resample
    pub fit: FitConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            min_successes: MIN_SUCCESSFUL_TRIALS,
            lower_quantile: 0.025,
            upper_quantile: 0.975,
            parallel: true,
            fit: FitConfig::default(),
        }
    }
}

/// Why a trial produced no estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscardReason {
    /// The resample shows a single observed proportion, so the slope is unidentifiable.
    Degenerate,
    /// The fitted ed50 was zero or negative.
    NonPositive,
    /// The fitted ed50 was NaN or infinite.
    NonFinite,
    /// The fitter returned an error.
    FitFailed(String),
}

/// Outcome of a single bootstrap trial.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    /// A usable ed50 estimate.
    Estimate(f64),
    /// The trial was discarded.
    Discarded(DiscardReason),
}

/// Result of a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// Percentile interval of the estimates, or undefined
    pub interval: ConfidenceInterval,

    /// Usable ed50 estimates in ascending order
    pub estimates: Vec<f64>,

    /// Number of trials run
    pub attempted: usize,

    /// Number of trials discarded
    pub discarded: usize,
}

impl BootstrapResult {
    /// Number of usable estimates.
    pub fn successes(&self) -> usize {
        self.estimates.len()
    }
}

/// Percentile bootstrap for the ed50.
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    config: BootstrapConfig,
}

impl Bootstrap {
    /// Create a bootstrap with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bootstrap with the given configuration.
    pub fn with_config(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Set the number of trials.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Choose between rayon and sequential trial execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run the bootstrap on `data`, drawing all randomness from `rng`.
    ///
    /// # Arguments
    ///
    /// * `data` - The original dataset, left untouched
    /// * `rng` - Random number generator seeding the trials
    ///
    /// # Returns
    ///
    /// * The interval and the estimates behind it, or an error if `data` has
    ///   fewer than [`MIN_OBSERVATIONS`] rows
    pub fn run<R: Rng + ?Sized>(
        &self,
        data: &DoseResponseData,
        rng: &mut R,
    ) -> Result<BootstrapResult> {
        if data.len() < MIN_OBSERVATIONS {
            return Err(Ld50Error::InsufficientData {
                required: MIN_OBSERVATIONS,
                found: data.len(),
            });
        }

        let seeds: Vec<u64> = (0..self.config.iterations).map(|_| rng.gen()).collect();
        let fitter = Fitter::with_config(self.config.fit.clone());
        let outcomes = self.execute(data, &fitter, &seeds);

        let mut estimates: Vec<f64> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                TrialOutcome::Estimate(ed50) => Some(*ed50),
                TrialOutcome::Discarded(_) => None,
            })
            .collect();
        estimates.sort_by(f64::total_cmp);

        let interval = percentile_interval(
            &estimates,
            self.config.lower_quantile,
            self.config.upper_quantile,
            self.config.min_successes,
        );
        let attempted = outcomes.len();
        let discarded = attempted - estimates.len();

        if interval.is_defined() {
            info!(
                attempted,
                successes = estimates.len(),
                discarded,
                lower = interval.lower,
                upper = interval.upper,
                "bootstrap complete"
            );
        } else {
            warn!(
                attempted,
                successes = estimates.len(),
                required = self.config.min_successes,
                "too few usable bootstrap estimates, interval undefined"
            );
        }

        Ok(BootstrapResult {
            interval,
            estimates,
            attempted,
            discarded,
        })
    }

    #[cfg(feature = "parallel")]
    fn execute(
        &self,
        data: &DoseResponseData,
        fitter: &Fitter,
        seeds: &[u64],
    ) -> Vec<TrialOutcome> {
        if self.config.parallel {
            seeds
                .par_iter()
                .map(|&seed| run_trial(data, fitter, seed))
                .collect()
        } else {
            seeds
                .iter()
                .map(|&seed| run_trial(data, fitter, seed))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn execute(
        &self,
        data: &DoseResponseData,
        fitter: &Fitter,
        seeds: &[u64],
    ) -> Vec<TrialOutcome> {
        seeds
            .iter()
            .map(|&seed| run_trial(data, fitter, seed))
            .collect()
    }
}

/// Resample, refit and classify one trial.
///
/// A resample whose positive-dose rows all share one observed proportion is
/// discarded before fitting. The fitter would still return a finite positive
/// ed50 for it, but that value is set by the optimizer's starting point rather
/// than by the data, and counting it would give all-or-nothing datasets a
/// defined interval.
fn run_trial(data: &DoseResponseData, fitter: &Fitter, seed: u64) -> TrialOutcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let resample = data.resample(&mut rng);

    if !resample.has_response_variation() {
        return TrialOutcome::Discarded(DiscardReason::Degenerate);
    }

    match fitter.fit(&resample) {
        Ok(fit) if !fit.ed50.is_finite() => TrialOutcome::Discarded(DiscardReason::NonFinite),
        Ok(fit) if fit.ed50 <= 0.0 => TrialOutcome::Discarded(DiscardReason::NonPositive),
        Ok(fit) => TrialOutcome::Estimate(fit.ed50),
        Err(e) => TrialOutcome::Discarded(DiscardReason::FitFailed(e.to_string())),
    }
}

/// Percentile bootstrap interval for the ed50 of `data`.
///
/// `iterations` trials are drawn from `rng`; pass a seeded generator for
/// reproducible intervals.
pub fn bootstrap_interval<R: Rng + ?Sized>(
    data: &DoseResponseData,
    iterations: usize,
    rng: &mut R,
) -> Result<ConfidenceInterval> {
    Bootstrap::new()
        .with_iterations(iterations)
        .run(data, rng)
        .map(|result| result.interval)
}

/// [`bootstrap_interval`] with a generator seeded from operating-system entropy.
pub fn bootstrap_interval_from_entropy(
    data: &DoseResponseData,
    iterations: usize,
) -> Result<ConfidenceInterval> {
    let mut rng = StdRng::from_entropy();
    bootstrap_interval(data, iterations, &mut rng)
}
