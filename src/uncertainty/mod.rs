//! # Uncertainty Calculation
//!
//! This module derives uncertainty for the fitted ed50 by nonparametric
//! bootstrap: the dataset is resampled with replacement, each resample is
//! refit, and the empirical distribution of the resulting estimates yields a
//! percentile confidence interval.
//!
//! An interval backed by too few usable estimates is reported as
//! [`ConfidenceInterval::undefined`] (NaN bounds), which callers must check
//! with [`ConfidenceInterval::is_defined`].

mod bootstrap;
mod confidence;

pub use bootstrap::{
    bootstrap_interval, bootstrap_interval_from_entropy, Bootstrap, BootstrapConfig,
    BootstrapResult, DiscardReason, TrialOutcome, DEFAULT_ITERATIONS, MIN_SUCCESSFUL_TRIALS,
};

pub use confidence::{percentile_interval, ConfidenceInterval};
