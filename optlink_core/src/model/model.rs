//! Provides struct representing an expression based optimization model
use indexmap::IndexMap;
use thiserror::Error;

use crate::model::expression::{CompensatedExpression, Expression, Slot};
use crate::model::model::ModelError::{
    NonExistentVariablesInConstraint, NonExistentVariablesInObjective,
};
use crate::model::objective::{Objective, ObjectiveSense};
use crate::model::variable::{Variable, VariableType};

/// An in-memory optimization model: ordered variables, ordered constraints
/// and one objective expression.
///
/// The model is the host side of the solver translation: it hands the
/// loader an ordered free-variable list, compensated constraint and
/// objective expressions, and the two structure queries
/// ([`any_variable_integer`](Self::any_variable_integer),
/// [`any_expression_quadratic`](Self::any_expression_quadratic)) that drive
/// solution type selection.
#[derive(Debug, Clone, Default)]
pub struct ExpressionModel {
    /// Variables of the model, keyed by id, in insertion order
    variables: IndexMap<String, Variable>,
    /// Constraints of the model, keyed by id, in insertion order
    constraints: IndexMap<String, Expression>,
    /// Objective to optimize
    objective: Objective,
}

impl ExpressionModel {
    // region Creation Functions
    /// Create a new model with a given objective sense
    pub fn new(objective_sense: ObjectiveSense) -> Self {
        Self {
            variables: IndexMap::new(),
            constraints: IndexMap::new(),
            objective: Objective::new(objective_sense),
        }
    }

    /// Create a new maximization model
    pub fn new_maximization() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new minimization model
    pub fn new_minimization() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }
    // endregion Creation Functions

    // region Adding Variables
    /// Add a variable to the model
    ///
    /// The variable's `index` is overwritten with its position in the model.
    pub fn add_variable(&mut self, mut variable: Variable) -> Result<usize, ModelError> {
        if self.variables.contains_key(&variable.id) {
            return Err(ModelError::VariableIdAlreadyExists);
        }
        if let (Some(lower), Some(upper)) = (variable.lower, variable.upper) {
            if lower > upper {
                return Err(ModelError::InvalidVariableBounds);
            }
        }
        let index = self.variables.len();
        variable.index = index;
        self.variables.insert(variable.id.clone(), variable);
        Ok(index)
    }

    /// Create a new variable and add it to the model
    pub fn add_new_variable(
        &mut self,
        id: &str,
        variable_type: VariableType,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<usize, ModelError> {
        self.add_variable(Variable {
            id: id.to_string(),
            name: None,
            variable_type,
            lower,
            upper,
            index: 0,
        })
    }
    // endregion Adding Variables

    // region Adding Constraints
    /// Add a constraint to the model
    pub fn add_constraint(&mut self, id: &str, expression: Expression) -> Result<(), ModelError> {
        if self.constraints.contains_key(id) {
            return Err(ModelError::ConstraintAlreadyExists);
        }
        if let (Some(lower), Some(upper)) = (expression.lower, expression.upper) {
            if lower > upper {
                return Err(ModelError::InvalidConstraintBounds);
            }
        }
        if !self.references_known_variables(&expression) {
            return Err(NonExistentVariablesInConstraint);
        }
        self.constraints.insert(id.to_string(), expression);
        Ok(())
    }
    // endregion Adding Constraints

    // region Objective
    /// Replace the objective of the model
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        if !self.references_known_variables(&objective.expression) {
            return Err(NonExistentVariablesInObjective);
        }
        self.objective = objective;
        Ok(())
    }

    /// Update the objective sense of the model
    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective.set_sense(sense);
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }
    // endregion Objective

    // region Accessors
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn variable_at(&self, index: usize) -> Option<&Variable> {
        self.variables.get_index(index).map(|(_, variable)| variable)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn constraint(&self, id: &str) -> Option<&Expression> {
        self.constraints.get(id)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&String, &Expression)> {
        self.constraints.iter()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
    // endregion Accessors

    // region Free Variables
    /// Variables not pinned to a constant, in model order
    pub fn free_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values().filter(|variable| !variable.is_fixed())
    }

    pub fn num_free_variables(&self) -> usize {
        self.free_variables().count()
    }

    /// Task column of each variable, by model index; `None` for pinned ones
    pub fn free_columns(&self) -> Vec<Option<usize>> {
        let mut next = 0;
        self.variables
            .values()
            .map(|variable| {
                if variable.is_fixed() {
                    None
                } else {
                    let column = next;
                    next += 1;
                    Some(column)
                }
            })
            .collect()
    }
    // endregion Free Variables

    // region Check Model
    /// Whether any free variable is an integer variable.
    ///
    /// A variable pinned by equal limits is a constant by the time columns
    /// exist, so it cannot force an integer solve.
    pub fn any_variable_integer(&self) -> bool {
        self.free_variables().any(Variable::is_integer)
    }

    /// Whether the objective or any constraint carries quadratic terms
    pub fn any_expression_quadratic(&self) -> bool {
        self.objective.is_quadratic()
            || self.constraints.values().any(Expression::is_quadratic)
    }
    // endregion Check Model

    // region Compensation
    /// Fold the contributions of pinned variables out of an expression.
    ///
    /// Coefficients on free variables are re-keyed to task columns. A linear
    /// term on a pinned variable moves into the constant; a quadratic term
    /// with one pinned side becomes a linear term on the free side; a term
    /// with both sides pinned moves into the constant. Eliminated entries
    /// stay in the result as [`Slot::Elided`] markers so the destination
    /// arrays keep their shape, and the limit pair is shifted by the
    /// constant.
    pub fn compensate(&self, expression: &Expression) -> CompensatedExpression {
        let columns = self.free_columns();
        let column_of = |index: usize| columns.get(index).copied().flatten();
        let value_of = |index: usize| {
            self.variable_at(index)
                .and_then(Variable::fixed_value)
                .unwrap_or(0.0)
        };

        let mut constant = 0.0;
        let mut folded_linear: IndexMap<usize, f64> = IndexMap::new();

        let mut quadratic = Vec::with_capacity(expression.quadratic.len());
        for (&(i, j), &coefficient) in &expression.quadratic {
            match (column_of(i), column_of(j)) {
                (Some(row), Some(column)) => {
                    quadratic.push(((Slot::Column(row), Slot::Column(column)), coefficient));
                }
                (Some(row), None) => {
                    *folded_linear.entry(row).or_insert(0.0) += coefficient * value_of(j);
                    quadratic.push(((Slot::Column(row), Slot::Elided), coefficient));
                }
                (None, Some(column)) => {
                    *folded_linear.entry(column).or_insert(0.0) += coefficient * value_of(i);
                    quadratic.push(((Slot::Elided, Slot::Column(column)), coefficient));
                }
                (None, None) => {
                    constant += coefficient * value_of(i) * value_of(j);
                    quadratic.push(((Slot::Elided, Slot::Elided), coefficient));
                }
            }
        }

        let mut linear = Vec::with_capacity(expression.linear.len() + folded_linear.len());
        for (&index, &coefficient) in &expression.linear {
            match column_of(index) {
                Some(column) => {
                    let folded = folded_linear.swap_remove(&column).unwrap_or(0.0);
                    linear.push((Slot::Column(column), coefficient + folded));
                }
                None => {
                    constant += coefficient * value_of(index);
                    linear.push((Slot::Elided, coefficient));
                }
            }
        }
        // Quadratic folds landing on columns with no original linear term
        for (column, coefficient) in folded_linear {
            linear.push((Slot::Column(column), coefficient));
        }

        CompensatedExpression {
            linear,
            quadratic,
            lower: expression.lower.map(|lower| lower - constant),
            upper: expression.upper.map(|upper| upper - constant),
            constant,
        }
    }
    // endregion Compensation

    fn references_known_variables(&self, expression: &Expression) -> bool {
        let limit = self.variables.len();
        expression.linear.keys().all(|&index| index < limit)
            && expression
                .quadratic
                .keys()
                .all(|&(row, column)| row < limit && column < limit)
    }
}

/// Errors associated with building an [`ExpressionModel`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Error when trying to add a variable with the same id as an existing variable
    #[error("Tried to add a variable with the same id as an existing variable")]
    VariableIdAlreadyExists,
    /// Error when trying to add a variable with lower > upper
    #[error("Tried to add a variable with lower limit above its upper limit")]
    InvalidVariableBounds,
    /// Error when trying to add a constraint with the same id as an existing constraint
    #[error("Tried to add a constraint with the same id as an existing constraint")]
    ConstraintAlreadyExists,
    /// Error when trying to add a constraint with lower > upper
    #[error("Tried to add a constraint with lower limit above its upper limit")]
    InvalidConstraintBounds,
    /// Error when a constraint references variables not in the model
    #[error("Tried to add a constraint with variables not in the model")]
    NonExistentVariablesInConstraint,
    /// Error when the objective references variables not in the model
    #[error("Tried to set an objective with variables not in the model")]
    NonExistentVariablesInObjective,
}
