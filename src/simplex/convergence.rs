//! Termination states of the simplex iteration.

/// Possible convergence states for the simplex method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// The algorithm is still running.
    Running,

    /// The spread of objective values across the simplex fell below the tolerance.
    FunctionValueConvergence,

    /// The algorithm stopped at the iteration cap. The best vertex is still returned.
    MaxIterationsReached,
}

impl ConvergenceStatus {
    /// Returns true if the optimization has terminated.
    pub fn is_terminated(&self) -> bool {
        !matches!(self, ConvergenceStatus::Running)
    }

    /// Returns true if the optimization has converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceStatus::FunctionValueConvergence)
    }

    /// Returns a description of the convergence status.
    pub fn description(&self) -> &'static str {
        match self {
            ConvergenceStatus::Running => "Optimization is still running",
            ConvergenceStatus::FunctionValueConvergence => {
                "Converged: simplex values within tolerance"
            }
            ConvergenceStatus::MaxIterationsReached => "Terminated: maximum iterations reached",
        }
    }

    /// Classify the simplex after sorting, given the best and worst vertex values.
    pub fn check(
        best: f64,
        worst: f64,
        tolerance: f64,
        iterations: usize,
        max_iterations: usize,
    ) -> Self {
        if worst - best < tolerance {
            ConvergenceStatus::FunctionValueConvergence
        } else if iterations >= max_iterations {
            ConvergenceStatus::MaxIterationsReached
        } else {
            ConvergenceStatus::Running
        }
    }
}
