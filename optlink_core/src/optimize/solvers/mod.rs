//! Solver backends and solution-type selection
use serde::{Deserialize, Serialize};

pub mod clarabel;

/// Which solution block is requested from the native solver after a solve.
///
/// The type is chosen once, before optimize runs, and reused unchanged for
/// every status and solution read; reading a different type than the one
/// that was computed is refused by
/// [`RawSolution`](crate::optimize::solvers::clarabel::RawSolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolutionType {
    /// Basic solution of a purely linear continuous problem
    Basic,
    /// Interior-point solution of a continuous problem with quadratic terms
    InteriorPoint,
    /// Integer solution of a problem with integer variables
    Integer,
}

/// Identifies a native solver backend, used for log-target matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    Clarabel,
}

/// Pick the solution type for a model: integer beats interior-point beats
/// basic. Pure in its two inputs.
pub fn select_solution_type(any_integer: bool, any_quadratic: bool) -> SolutionType {
    if any_integer {
        SolutionType::Integer
    } else if any_quadratic {
        SolutionType::InteriorPoint
    } else {
        SolutionType::Basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_covers_all_combinations() {
        assert_eq!(select_solution_type(false, false), SolutionType::Basic);
        assert_eq!(select_solution_type(false, true), SolutionType::InteriorPoint);
        // Integer wins over quadratic
        assert_eq!(select_solution_type(true, false), SolutionType::Integer);
        assert_eq!(select_solution_type(true, true), SolutionType::Integer);
    }
}
