//! Nelder-Mead simplex minimization.
//!
//! A derivative-free local minimizer over `ndarray` vectors. The optimizer
//! knows nothing about dose-response models: any type implementing
//! [`Objective`], including plain closures, can be minimized.

pub mod algorithm;
pub mod config;
pub mod convergence;

pub use algorithm::{minimize, NelderMead, Objective, SimplexResult};
pub use config::NelderMeadConfig;
pub use convergence::ConvergenceStatus;
