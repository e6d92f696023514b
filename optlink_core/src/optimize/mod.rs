//! Translation layer between expression models and the native solver task
use serde::Serialize;
use thiserror::Error;

pub mod bounds;
pub mod coefficients;
pub mod loader;
pub mod options;
pub mod session;
pub mod solvers;
pub mod status;
pub mod task;

pub use status::Outcome;

/// Errors from task registration and solve invocation.
///
/// These never reach a caller of `solve`: a non-ok optimize call is
/// recovered locally into a failed [`SolveResult`]. They surface from the
/// registration API and from building a solver out of an inconsistent
/// model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// A row or column index outside the task dimensions
    #[error("index {index} is outside the task dimension {limit}")]
    IndexOutOfRange { index: usize, limit: usize },
    /// Parallel triplet arrays of different lengths
    #[error("triplet arrays have mismatched lengths")]
    LengthMismatch,
    /// A slot the loader should have registered is still unset
    #[error("task has an unset {what} at position {index}")]
    IncompleteTask { what: &'static str, index: usize },
    /// The objective sense was never registered
    #[error("objective sense has not been registered")]
    MissingSense,
    /// The owning session was disposed before the solve
    #[error("session has already been disposed")]
    SessionDisposed,
    /// The native solver cannot accept this task structure
    #[error("the native solver does not accept {0}")]
    Unsupported(&'static str),
}

/// Result of one solve call
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    /// Model level outcome of the solve
    pub outcome: Outcome,
    /// Objective value; NaN unless the outcome is optimal
    pub value: f64,
    /// One entry per free variable, in model order. Present for every
    /// outcome but meaningful only when optimal.
    pub solution: Vec<f64>,
}

impl SolveResult {
    /// The default failed result: NaN value and a zero filled vector
    pub fn failed(num_columns: usize) -> Self {
        Self {
            outcome: Outcome::Failed,
            value: f64::NAN,
            solution: vec![0.0; num_columns],
        }
    }
}
