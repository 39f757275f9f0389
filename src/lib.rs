//! # ld50-rs
//!
//! `ld50-rs` fits two-parameter log-logistic dose-response curves to binomial
//! data and quantifies the uncertainty of the median effective (or lethal)
//! dose.
//!
//! The library provides:
//! - The log-logistic model and its binomial negative log-likelihood
//! - A generic Nelder-Mead simplex minimizer
//! - A maximum-likelihood fitter with a data-driven starting point
//! - Percentile bootstrap confidence intervals for the ED50
//! - CSV ingestion of `dose,response,total` tables
//!
//! ## Basic Usage
//!
//! ```
//! use ld50_rs::{bootstrap_interval, fit, DoseResponseData};
//! use rand::SeedableRng;
//!
//! let data = DoseResponseData::from_csv_str(
//!     "dose,response,total\n1,0,20\n2,3,20\n4,10,20\n8,17,20\n16,20,20\n",
//! )?;
//!
//! let result = fit(&data)?;
//! assert!(result.ed50 > 2.0 && result.ed50 < 8.0);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let interval = bootstrap_interval(&data, 200, &mut rng)?;
//! if interval.is_defined() {
//!     println!("ED50 = {:.3} {}", result.ed50, interval);
//! }
//! # Ok::<(), ld50_rs::Ld50Error>(())
//! ```

// Public modules
pub mod error;

pub mod data;

pub mod model;

pub mod simplex;

pub mod fit;

pub mod uncertainty;

// Re-exports for convenience
pub use data::{DoseResponseData, Observation};
pub use error::{Ld50Error, Result};
pub use fit::{fit, FitConfig, FitResult, Fitter, INFEASIBLE_PENALTY};
pub use model::{logistic_response, neg_log_likelihood, ModelParams};
pub use simplex::{minimize, NelderMead, NelderMeadConfig, Objective, SimplexResult};
pub use uncertainty::{
    bootstrap_interval, bootstrap_interval_from_entropy, Bootstrap, BootstrapConfig,
    BootstrapResult, ConfidenceInterval,
};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
