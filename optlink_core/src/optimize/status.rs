//! Maps the native solver's status enumeration to model level outcomes
use clarabel::solver::SolverStatus;
use serde::{Deserialize, Serialize};

/// Model level outcome of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The solver reported an optimal or near optimal solution
    Optimal,
    /// The solver produced an infeasibility certificate
    Infeasible,
    /// Anything else: limits hit, numerical trouble, unsolved
    Failed,
}

/// Classify a raw solution status.
///
/// Total over the whole enumeration: statuses not recognized as optimal or
/// as an infeasibility certificate fall through to [`Outcome::Failed`],
/// including any variant a future solver version may add.
pub fn map_solution_status(status: SolverStatus) -> Outcome {
    match status {
        SolverStatus::Solved | SolverStatus::AlmostSolved => Outcome::Optimal,
        SolverStatus::PrimalInfeasible
        | SolverStatus::DualInfeasible
        | SolverStatus::AlmostPrimalInfeasible
        | SolverStatus::AlmostDualInfeasible => Outcome::Infeasible,
        _ => Outcome::Failed,
    }
}
