//! Configuration options for the Nelder-Mead simplex method.

/// Configuration options for the Nelder-Mead optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations. Default: 2000
    pub max_iterations: usize,

    /// Spread between best and worst vertex value below which the simplex
    /// has converged. Default: 1e-6
    pub tolerance: f64,

    /// Offset applied to each coordinate when building the initial simplex. Default: 0.1
    pub initial_step: f64,

    /// Reflection coefficient. Default: 1.0
    pub reflection: f64,

    /// Expansion coefficient. Default: 2.0
    pub expansion: f64,

    /// Contraction coefficient. Default: 0.5
    pub contraction: f64,

    /// Shrink coefficient. Default: 0.5
    pub shrink: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-6,
            initial_step: 0.1,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
        }
    }
}
