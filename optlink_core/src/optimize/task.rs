//! Solver-native task: the sparse triplet image of one model
use serde::Serialize;

use crate::model::objective::ObjectiveSense;
use crate::optimize::bounds::BoundInfo;
use crate::optimize::TaskError;

/// Column type registered on the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Continuous,
    Integer,
}

/// The solver side counterpart of a model: per-column bound and type,
/// per-row bound plus sparse linear and quadratic coefficient blocks, and
/// an objective block with sense and constant term.
///
/// Row and column counts are fixed at construction; the `put_*` calls
/// register data into existing slots and never resize. A freshly built task
/// has every bound, type and sense slot unset;
/// [`validate_complete`](Self::validate_complete) checks that a loader left
/// none of them in that state.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    num_rows: usize,
    num_columns: usize,
    column_bounds: Vec<Option<BoundInfo>>,
    column_types: Vec<Option<ColumnType>>,
    row_bounds: Vec<Option<BoundInfo>>,
    row_linear: Vec<(Vec<usize>, Vec<f64>)>,
    row_quadratic: Vec<(Vec<usize>, Vec<usize>, Vec<f64>)>,
    objective_linear: (Vec<usize>, Vec<f64>),
    objective_quadratic: (Vec<usize>, Vec<usize>, Vec<f64>),
    objective_constant: f64,
    objective_sense: Option<ObjectiveSense>,
}

impl Task {
    /// Create an empty task with fixed dimensions
    pub fn new(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
            column_bounds: vec![None; num_columns],
            column_types: vec![None; num_columns],
            row_bounds: vec![None; num_rows],
            row_linear: vec![(Vec::new(), Vec::new()); num_rows],
            row_quadratic: vec![(Vec::new(), Vec::new(), Vec::new()); num_rows],
            objective_linear: (Vec::new(), Vec::new()),
            objective_quadratic: (Vec::new(), Vec::new(), Vec::new()),
            objective_constant: 0.0,
            objective_sense: None,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    // region Registration
    pub fn put_column_bound(&mut self, column: usize, bound: BoundInfo) -> Result<(), TaskError> {
        let slot = self
            .column_bounds
            .get_mut(column)
            .ok_or(TaskError::IndexOutOfRange {
                index: column,
                limit: self.num_columns,
            })?;
        *slot = Some(bound);
        Ok(())
    }

    pub fn put_column_type(
        &mut self,
        column: usize,
        column_type: ColumnType,
    ) -> Result<(), TaskError> {
        let slot = self
            .column_types
            .get_mut(column)
            .ok_or(TaskError::IndexOutOfRange {
                index: column,
                limit: self.num_columns,
            })?;
        *slot = Some(column_type);
        Ok(())
    }

    pub fn put_row_bound(&mut self, row: usize, bound: BoundInfo) -> Result<(), TaskError> {
        let limit = self.num_rows;
        let slot = self
            .row_bounds
            .get_mut(row)
            .ok_or(TaskError::IndexOutOfRange { index: row, limit })?;
        *slot = Some(bound);
        Ok(())
    }

    /// Register the sparse linear coefficients of one row
    pub fn put_row_linear(
        &mut self,
        row: usize,
        columns: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<(), TaskError> {
        self.check_row(row)?;
        self.check_columns(&columns)?;
        if columns.len() != values.len() {
            return Err(TaskError::LengthMismatch);
        }
        self.row_linear[row] = (columns, values);
        Ok(())
    }

    /// Register the canonical triangular quadratic block of one row
    pub fn put_row_quadratic(
        &mut self,
        row: usize,
        quad_rows: Vec<usize>,
        quad_columns: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<(), TaskError> {
        self.check_row(row)?;
        self.check_columns(&quad_rows)?;
        self.check_columns(&quad_columns)?;
        if quad_rows.len() != values.len() || quad_columns.len() != values.len() {
            return Err(TaskError::LengthMismatch);
        }
        self.row_quadratic[row] = (quad_rows, quad_columns, values);
        Ok(())
    }

    pub fn put_objective_linear(
        &mut self,
        columns: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<(), TaskError> {
        self.check_columns(&columns)?;
        if columns.len() != values.len() {
            return Err(TaskError::LengthMismatch);
        }
        self.objective_linear = (columns, values);
        Ok(())
    }

    pub fn put_objective_quadratic(
        &mut self,
        quad_rows: Vec<usize>,
        quad_columns: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<(), TaskError> {
        self.check_columns(&quad_rows)?;
        self.check_columns(&quad_columns)?;
        if quad_rows.len() != values.len() || quad_columns.len() != values.len() {
            return Err(TaskError::LengthMismatch);
        }
        self.objective_quadratic = (quad_rows, quad_columns, values);
        Ok(())
    }

    /// Register the constant term of the objective
    pub fn put_objective_constant(&mut self, constant: f64) {
        self.objective_constant = constant;
    }

    pub fn put_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective_sense = Some(sense);
    }
    // endregion Registration

    // region Readback
    pub fn column_bound(&self, column: usize) -> Option<BoundInfo> {
        self.column_bounds.get(column).copied().flatten()
    }

    pub fn column_type(&self, column: usize) -> Option<ColumnType> {
        self.column_types.get(column).copied().flatten()
    }

    pub fn row_bound(&self, row: usize) -> Option<BoundInfo> {
        self.row_bounds.get(row).copied().flatten()
    }

    pub fn row_linear(&self, row: usize) -> (&[usize], &[f64]) {
        let (columns, values) = &self.row_linear[row];
        (columns, values)
    }

    pub fn row_quadratic(&self, row: usize) -> (&[usize], &[usize], &[f64]) {
        let (rows, columns, values) = &self.row_quadratic[row];
        (rows, columns, values)
    }

    pub fn objective_linear(&self) -> (&[usize], &[f64]) {
        let (columns, values) = &self.objective_linear;
        (columns, values)
    }

    pub fn objective_quadratic(&self) -> (&[usize], &[usize], &[f64]) {
        let (rows, columns, values) = &self.objective_quadratic;
        (rows, columns, values)
    }

    pub fn objective_constant(&self) -> f64 {
        self.objective_constant
    }

    pub fn objective_sense(&self) -> Option<ObjectiveSense> {
        self.objective_sense
    }
    // endregion Readback

    // region Structure Queries
    pub fn has_integer_columns(&self) -> bool {
        self.column_types
            .iter()
            .any(|column_type| *column_type == Some(ColumnType::Integer))
    }

    /// Whether any constraint row carries a quadratic block with a nonzero
    /// coefficient (placeholder-only blocks do not count)
    pub fn has_quadratic_rows(&self) -> bool {
        self.row_quadratic
            .iter()
            .any(|(_, _, values)| values.iter().any(|&value| value != 0.0))
    }

    pub fn is_objective_quadratic(&self) -> bool {
        !self.objective_quadratic.2.is_empty()
    }
    // endregion Structure Queries

    /// Check that every slot was registered exactly as the loader promises:
    /// no column bound, column type, row bound or objective sense left unset
    pub fn validate_complete(&self) -> Result<(), TaskError> {
        if let Some(index) = self.column_bounds.iter().position(Option::is_none) {
            return Err(TaskError::IncompleteTask {
                what: "column bound",
                index,
            });
        }
        if let Some(index) = self.column_types.iter().position(Option::is_none) {
            return Err(TaskError::IncompleteTask {
                what: "column type",
                index,
            });
        }
        if let Some(index) = self.row_bounds.iter().position(Option::is_none) {
            return Err(TaskError::IncompleteTask {
                what: "row bound",
                index,
            });
        }
        if self.objective_sense.is_none() {
            return Err(TaskError::MissingSense);
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<(), TaskError> {
        if row < self.num_rows {
            Ok(())
        } else {
            Err(TaskError::IndexOutOfRange {
                index: row,
                limit: self.num_rows,
            })
        }
    }

    fn check_columns(&self, columns: &[usize]) -> Result<(), TaskError> {
        match columns.iter().find(|&&column| column >= self.num_columns) {
            Some(&column) => Err(TaskError::IndexOutOfRange {
                index: column,
                limit: self.num_columns,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::bounds::{classify, BoundKind};

    fn filled_task() -> Task {
        let mut task = Task::new(1, 2);
        task.put_column_bound(0, classify(Some(0.0), None)).unwrap();
        task.put_column_type(0, ColumnType::Continuous).unwrap();
        task.put_column_bound(1, classify(None, Some(5.0))).unwrap();
        task.put_column_type(1, ColumnType::Continuous).unwrap();
        task.put_row_linear(0, vec![0, 1], vec![1.0, 1.0]).unwrap();
        task.put_row_bound(0, classify(None, Some(10.0))).unwrap();
        task.put_objective_linear(vec![0, 1], vec![1.0, 1.0]).unwrap();
        task.put_objective_sense(ObjectiveSense::Minimize);
        task
    }

    #[test]
    fn registration_round_trip() {
        let task = filled_task();
        assert_eq!(task.num_rows(), 1);
        assert_eq!(task.num_columns(), 2);
        assert_eq!(task.column_bound(0).unwrap().kind, BoundKind::Lower);
        assert_eq!(task.column_bound(1).unwrap().kind, BoundKind::Upper);
        assert_eq!(task.row_bound(0).unwrap().kind, BoundKind::Upper);
        assert_eq!(task.row_linear(0), (&[0usize, 1][..], &[1.0, 1.0][..]));
        assert_eq!(task.objective_sense(), Some(ObjectiveSense::Minimize));
        assert!(task.validate_complete().is_ok());
    }

    #[test]
    fn out_of_range_registration_is_rejected() {
        let mut task = Task::new(1, 2);
        let result = task.put_column_bound(2, classify(None, None));
        assert!(matches!(
            result,
            Err(TaskError::IndexOutOfRange { index: 2, limit: 2 })
        ));
        let result = task.put_row_linear(0, vec![0, 5], vec![1.0, 1.0]);
        assert!(matches!(
            result,
            Err(TaskError::IndexOutOfRange { index: 5, limit: 2 })
        ));
        let result = task.put_row_linear(3, vec![0], vec![1.0]);
        assert!(matches!(
            result,
            Err(TaskError::IndexOutOfRange { index: 3, limit: 1 })
        ));
    }

    #[test]
    fn mismatched_triplet_lengths_are_rejected() {
        let mut task = Task::new(1, 2);
        let result = task.put_row_linear(0, vec![0, 1], vec![1.0]);
        assert!(matches!(result, Err(TaskError::LengthMismatch)));
        let result = task.put_objective_quadratic(vec![0], vec![0, 1], vec![1.0]);
        assert!(matches!(result, Err(TaskError::LengthMismatch)));
    }

    #[test]
    fn incomplete_task_is_detected() {
        let mut task = Task::new(0, 1);
        task.put_column_bound(0, classify(None, None)).unwrap();
        let result = task.validate_complete();
        assert!(matches!(
            result,
            Err(TaskError::IncompleteTask {
                what: "column type",
                index: 0
            })
        ));

        task.put_column_type(0, ColumnType::Continuous).unwrap();
        assert!(matches!(task.validate_complete(), Err(TaskError::MissingSense)));

        task.put_objective_sense(ObjectiveSense::Maximize);
        assert!(task.validate_complete().is_ok());
    }

    #[test]
    fn integer_and_quadratic_structure_queries() {
        let mut task = filled_task();
        assert!(!task.has_integer_columns());
        assert!(!task.has_quadratic_rows());
        assert!(!task.is_objective_quadratic());

        task.put_column_type(1, ColumnType::Integer).unwrap();
        assert!(task.has_integer_columns());

        // A placeholder-only block does not make the row quadratic
        task.put_row_quadratic(0, vec![0], vec![0], vec![0.0]).unwrap();
        assert!(!task.has_quadratic_rows());
        task.put_row_quadratic(0, vec![1], vec![0], vec![2.0]).unwrap();
        assert!(task.has_quadratic_rows());

        task.put_objective_quadratic(vec![0], vec![0], vec![3.0]).unwrap();
        assert!(task.is_objective_quadratic());
    }
}
