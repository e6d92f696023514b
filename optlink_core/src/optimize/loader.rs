//! Populates a solver task from an expression model in three ordered passes
use tracing::{debug, trace};

use crate::model::model::ExpressionModel;
use crate::optimize::bounds::classify;
use crate::optimize::coefficients::{canonicalize_quadratic, extract_linear};
use crate::optimize::task::{ColumnType, Task};
use crate::optimize::TaskError;

/// Build a task sized to the model (rows = constraints, columns = free
/// variables) and populate it in three passes: variables, constraints,
/// objective.
///
/// Variables are classified on their unadjusted limits; constraints and the
/// objective are compensated for pinned variables first and classified on
/// the adjusted limits. The returned task has every slot registered; no
/// solve is triggered.
pub fn load(model: &ExpressionModel) -> Result<Task, TaskError> {
    let num_rows = model.num_constraints();
    let num_columns = model.num_free_variables();
    let mut task = Task::new(num_rows, num_columns);

    for (column, variable) in model.free_variables().enumerate() {
        let bound = classify(variable.lower, variable.upper);
        let column_type = if variable.is_integer() {
            ColumnType::Integer
        } else {
            ColumnType::Continuous
        };
        task.put_column_bound(column, bound)?;
        task.put_column_type(column, column_type)?;
        trace!(
            variable = variable.id.as_str(),
            column,
            kind = ?bound.kind,
            ?column_type,
            "registered variable"
        );
    }

    for (row, (id, expression)) in model.constraints().enumerate() {
        let compensated = model.compensate(expression);

        let (columns, values) = extract_linear(&compensated.linear);
        if !columns.is_empty() {
            task.put_row_linear(row, columns, values)?;
        }

        let (quad_rows, quad_columns, quad_values) =
            canonicalize_quadratic(&compensated.quadratic);
        if !quad_rows.is_empty() {
            task.put_row_quadratic(row, quad_rows, quad_columns, quad_values)?;
        }

        let bound = classify(compensated.lower, compensated.upper);
        task.put_row_bound(row, bound)?;
        trace!(constraint = id.as_str(), row, kind = ?bound.kind, "registered constraint");
    }

    let compensated = model.compensate(&model.objective().expression);
    let (columns, values) = extract_linear(&compensated.linear);
    if !columns.is_empty() {
        task.put_objective_linear(columns, values)?;
    }
    let (quad_rows, quad_columns, quad_values) = canonicalize_quadratic(&compensated.quadratic);
    if !quad_rows.is_empty() {
        task.put_objective_quadratic(quad_rows, quad_columns, quad_values)?;
    }
    task.put_objective_constant(compensated.constant);
    task.put_objective_sense(model.objective().sense);

    task.validate_complete()?;
    debug!(
        rows = num_rows,
        columns = num_columns,
        sense = ?model.objective().sense,
        "loaded model into task"
    );
    Ok(task)
}
