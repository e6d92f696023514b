//! Clarabel backend: lowers a task to conic standard form and runs one solve
use std::sync::Arc;

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettings, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use nalgebra_sparse::coo::CooMatrix;
use nalgebra_sparse::csc::CscMatrix as SparseCsc;
use tracing::{debug, warn};

use crate::model::model::ExpressionModel;
use crate::model::objective::ObjectiveSense;
use crate::optimize::bounds::{BoundInfo, BoundKind};
use crate::optimize::loader;
use crate::optimize::options::SolveOptions;
use crate::optimize::session::Session;
use crate::optimize::solvers::{select_solution_type, SolutionType, SolverKind};
use crate::optimize::status::map_solution_status;
use crate::optimize::task::Task;
use crate::optimize::{Outcome, SolveResult, TaskError};

/// Raw readback of one optimize call, tied to the solution type that was
/// selected before solving. Reads requesting any other type return `None`;
/// picking the type once and reusing it is the contract, and the readback
/// refuses to paper over a violation.
#[derive(Debug, Clone)]
pub struct RawSolution {
    solution_type: SolutionType,
    status: SolverStatus,
    objective: f64,
    primal: Vec<f64>,
}

impl RawSolution {
    pub fn status(&self, requested: SolutionType) -> Option<SolverStatus> {
        (requested == self.solution_type).then_some(self.status)
    }

    /// Sense corrected primal objective, including the task constant
    pub fn objective(&self, requested: SolutionType) -> Option<f64> {
        (requested == self.solution_type).then_some(self.objective)
    }

    pub fn primal(&self, requested: SolutionType) -> Option<&[f64]> {
        (requested == self.solution_type).then_some(self.primal.as_slice())
    }
}

/// One solver instance: a populated task, the shared session, the options
/// of the next solve and the solution type fixed at build time.
pub struct ClarabelSolver {
    task: Task,
    session: Arc<Session>,
    options: SolveOptions,
    solution_type: SolutionType,
}

impl ClarabelSolver {
    /// Load the model into a freshly sized task and fix the solution type
    /// from the model's structure queries.
    pub fn build(
        model: &ExpressionModel,
        session: Arc<Session>,
        options: SolveOptions,
    ) -> Result<Self, TaskError> {
        let task = loader::load(model)?;
        let solution_type = select_solution_type(
            model.any_variable_integer(),
            model.any_expression_quadratic(),
        );
        debug!(
            rows = task.num_rows(),
            columns = task.num_columns(),
            ?solution_type,
            "built solver instance"
        );
        Ok(Self {
            task,
            session,
            options,
            solution_type,
        })
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The solution type fixed before any solve, see
    /// [`select_solution_type`]
    pub fn solution_type(&self) -> SolutionType {
        self.solution_type
    }

    /// Run the solve and classify the outcome.
    ///
    /// A non-ok return from the optimize call (disposed session, incomplete
    /// task, structure the native solver does not accept) recovers locally
    /// into the default failed result without attempting any status or
    /// solution read. Panics raised while configuring or solving propagate
    /// to the caller unmodified.
    pub fn solve(&mut self) -> SolveResult {
        let num_columns = self.task.num_columns();
        let selected = self.solution_type;
        match self.try_optimize() {
            Ok(raw) => {
                let mut result = SolveResult::failed(num_columns);
                if let (Some(status), Some(primal)) =
                    (raw.status(selected), raw.primal(selected))
                {
                    result.solution = primal.to_vec();
                    result.outcome = map_solution_status(status);
                    if result.outcome == Outcome::Optimal {
                        result.value = raw.objective(selected).unwrap_or(f64::NAN);
                    }
                }
                result
            }
            Err(error) => {
                warn!(%error, "optimize returned non-ok, reporting a failed result");
                SolveResult::failed(num_columns)
            }
        }
    }

    /// Release the task together with its owning instance. Dropping the
    /// value does the same; the shared session has its own dispose.
    pub fn dispose(self) {}

    /// Configure and invoke the native solver exactly once.
    fn try_optimize(&self) -> Result<RawSolution, TaskError> {
        if self.session.is_disposed() {
            return Err(TaskError::SessionDisposed);
        }
        self.task.validate_complete()?;
        if self.task.num_columns() == 0 {
            return Err(TaskError::Unsupported("an empty column set"));
        }
        if self.task.has_integer_columns() {
            return Err(TaskError::Unsupported("integer columns"));
        }
        if self.task.has_quadratic_rows() {
            return Err(TaskError::Unsupported("quadratic constraint rows"));
        }

        // Baseline first, then the user chain in order
        let mut settings = DefaultSettings::default();
        baseline_configure(&self.session, &mut settings, &self.options);
        for configurator in &self.options.configurators {
            configurator(&self.session, &mut settings, &self.options);
        }

        let lowered = lower_task(&self.task)?;
        let log_enabled = self.options.logs_to(SolverKind::Clarabel);
        if log_enabled {
            self.session.stream(&format!(
                "optimizer started: {} rows, {} columns, {} cone blocks",
                lowered.b.len(),
                self.task.num_columns(),
                lowered.cones.len()
            ));
        }

        let mut solver = DefaultSolver::new(
            &lowered.p,
            &lowered.q,
            &lowered.a,
            &lowered.b,
            &lowered.cones,
            settings,
        );
        solver.solve();

        let solution = &solver.solution;
        if log_enabled {
            self.session.stream(&format!(
                "optimizer terminated: {:?} in {} iterations ({:.6}s)",
                solution.status, solution.iterations, solution.solve_time
            ));
        }
        debug!(
            status = ?solution.status,
            iterations = solution.iterations,
            "clarabel solve completed"
        );

        let sign = objective_sign(self.task.objective_sense().ok_or(TaskError::MissingSense)?);
        let objective = sign * solution.obj_val + self.task.objective_constant();
        Ok(RawSolution {
            solution_type: self.solution_type,
            status: solution.status,
            objective,
            primal: solution.x.clone(),
        })
    }
}

/// Baseline configuration applied before any user configurator: the time
/// limit, and native log output gated on whether the configured log target
/// is this solver.
fn baseline_configure(
    _session: &Session,
    settings: &mut DefaultSettings<f64>,
    options: &SolveOptions,
) {
    settings.time_limit = options.time_limit;
    settings.verbose = options.logs_to(SolverKind::Clarabel);
}

fn objective_sign(sense: ObjectiveSense) -> f64 {
    match sense {
        ObjectiveSense::Minimize => 1.0,
        // Clarabel only minimizes; maximization is lowered by negation and
        // the reported value is corrected with the same sign
        ObjectiveSense::Maximize => -1.0,
    }
}

/// The task lowered to Clarabel standard form:
/// minimize `0.5 x'Px + q'x` subject to `Ax + s = b`, `s` in the cones.
struct LoweredProblem {
    p: CscMatrix<f64>,
    q: Vec<f64>,
    a: CscMatrix<f64>,
    b: Vec<f64>,
    cones: Vec<SupportedConeT<f64>>,
}

/// Lower the triplet task: fixed bounds become zero cone rows, the other
/// bounded sides become nonnegative cone rows (lower sides negated), the
/// objective triangle transposes into Clarabel's upper triangular `P` with
/// values unchanged. Explicit zero placeholders pass through the assembly
/// and evaluate the same as omitted entries.
fn lower_task(task: &Task) -> Result<LoweredProblem, TaskError> {
    let num_columns = task.num_columns();
    let sense = task.objective_sense().ok_or(TaskError::MissingSense)?;
    let sign = objective_sign(sense);

    let mut q = vec![0.0; num_columns];
    let (columns, values) = task.objective_linear();
    for (&column, &value) in columns.iter().zip(values) {
        q[column] += sign * value;
    }

    let mut p_coo = CooMatrix::new(num_columns, num_columns);
    let (quad_rows, quad_columns, quad_values) = task.objective_quadratic();
    for ((&row, &column), &value) in quad_rows.iter().zip(quad_columns).zip(quad_values) {
        // task stores the lower triangle, Clarabel expects the upper
        p_coo.push(column, row, sign * value);
    }

    // Equality rows first, then inequalities; constraint rows before
    // variable bound rows within each block
    let mut equalities: Vec<(Vec<(usize, f64)>, f64)> = Vec::new();
    let mut inequalities: Vec<(Vec<(usize, f64)>, f64)> = Vec::new();

    for row in 0..task.num_rows() {
        let bound = task.row_bound(row).ok_or(TaskError::IncompleteTask {
            what: "row bound",
            index: row,
        })?;
        let (columns, values) = task.row_linear(row);
        let coefficients: Vec<(usize, f64)> = columns
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();
        push_bound_rows(&mut equalities, &mut inequalities, coefficients, bound);
    }
    for column in 0..num_columns {
        let bound = task.column_bound(column).ok_or(TaskError::IncompleteTask {
            what: "column bound",
            index: column,
        })?;
        push_bound_rows(
            &mut equalities,
            &mut inequalities,
            vec![(column, 1.0)],
            bound,
        );
    }

    let num_rows = equalities.len() + inequalities.len();
    let mut a_coo = CooMatrix::new(num_rows, num_columns);
    let mut b = Vec::with_capacity(num_rows);
    for (index, (coefficients, rhs)) in
        equalities.iter().chain(inequalities.iter()).enumerate()
    {
        for &(column, value) in coefficients {
            a_coo.push(index, column, value);
        }
        b.push(*rhs);
    }

    let mut cones = Vec::new();
    if !equalities.is_empty() {
        cones.push(SupportedConeT::ZeroConeT(equalities.len()));
    }
    if !inequalities.is_empty() {
        cones.push(SupportedConeT::NonnegativeConeT(inequalities.len()));
    }

    Ok(LoweredProblem {
        p: to_clarabel_csc(&SparseCsc::from(&p_coo)),
        q,
        a: to_clarabel_csc(&SparseCsc::from(&a_coo)),
        b,
        cones,
    })
}

fn push_bound_rows(
    equalities: &mut Vec<(Vec<(usize, f64)>, f64)>,
    inequalities: &mut Vec<(Vec<(usize, f64)>, f64)>,
    coefficients: Vec<(usize, f64)>,
    bound: BoundInfo,
) {
    match bound.kind {
        BoundKind::Fixed => equalities.push((coefficients, bound.lower)),
        BoundKind::Upper => inequalities.push((coefficients, bound.upper)),
        BoundKind::Lower => inequalities.push((negate(&coefficients), -bound.lower)),
        BoundKind::Ranged => {
            inequalities.push((coefficients.clone(), bound.upper));
            inequalities.push((negate(&coefficients), -bound.lower));
        }
        BoundKind::Free => {}
    }
}

fn negate(coefficients: &[(usize, f64)]) -> Vec<(usize, f64)> {
    coefficients
        .iter()
        .map(|&(column, value)| (column, -value))
        .collect()
}

/// Convert nalgebra CSC storage to Clarabel CSC
fn to_clarabel_csc(matrix: &SparseCsc<f64>) -> CscMatrix<f64> {
    CscMatrix::new(
        matrix.nrows(),
        matrix.ncols(),
        matrix.col_offsets().to_vec(),
        matrix.row_indices().to_vec(),
        matrix.values().to_vec(),
    )
}
