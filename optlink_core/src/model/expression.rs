//! Sparse linear and quadratic expressions keyed by model variable index
use indexmap::IndexMap;

/// A constraint or objective body: sparse coefficient maps over model
/// variable indices, plus an optional limit pair used by constraints.
///
/// A quadratic key `(i, j)` stands for the mathematical term
/// `c * x_i * x_j` (`c * x_i^2` on the diagonal); the symmetric storage
/// convention of the solver task is only introduced during extraction.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    /// Linear coefficients, variable index -> value
    pub linear: IndexMap<usize, f64>,
    /// Quadratic coefficients, ordered index pair -> value
    pub quadratic: IndexMap<(usize, usize), f64>,
    /// Lower limit, absent means unbounded below
    pub lower: Option<f64>,
    /// Upper limit, absent means unbounded above
    pub upper: Option<f64>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an expression carrying a limit pair, for use as a constraint
    pub fn with_bounds(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            lower,
            upper,
            ..Self::default()
        }
    }

    /// Add to the linear coefficient of a variable
    pub fn add_linear_term(&mut self, index: usize, coefficient: f64) {
        *self.linear.entry(index).or_insert(0.0) += coefficient;
    }

    /// Add to the quadratic coefficient of an index pair
    pub fn add_quadratic_term(&mut self, row: usize, column: usize, coefficient: f64) {
        *self.quadratic.entry((row, column)).or_insert(0.0) += coefficient;
    }

    pub fn is_quadratic(&self) -> bool {
        !self.quadratic.is_empty()
    }
}

/// Destination of one compensated coefficient.
///
/// Compensation never encodes an eliminated coefficient as an out of range
/// index; an entry either targets a live task column or is explicitly
/// marked elided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A live coefficient on this task column
    Column(usize),
    /// Coefficient eliminated by fixed-variable compensation; extraction
    /// materializes it as a zero valued placeholder
    Elided,
}

/// An expression after fixed-variable compensation: coefficients are
/// re-keyed to task columns, contributions of pinned variables are folded
/// into `constant` (and, for mixed quadratic terms, into the linear part),
/// and the limit pair is shifted accordingly.
#[derive(Debug, Clone, Default)]
pub struct CompensatedExpression {
    /// Linear entries in destination order; elided entries keep their
    /// original coefficient so no mass disappears from the bookkeeping
    pub linear: Vec<(Slot, f64)>,
    /// Quadratic entries; a pair containing an elided side has been folded
    /// elsewhere and extracts as a placeholder
    pub quadratic: Vec<((Slot, Slot), f64)>,
    /// Adjusted lower limit
    pub lower: Option<f64>,
    /// Adjusted upper limit
    pub upper: Option<f64>,
    /// Constant contribution of the pinned variables
    pub constant: f64,
}

impl CompensatedExpression {
    /// Total coefficient value still attached to live columns
    pub fn retained_mass(&self) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .filter(|(slot, _)| matches!(slot, Slot::Column(_)))
            .map(|(_, value)| value)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|((row, column), _)| {
                matches!(row, Slot::Column(_)) && matches!(column, Slot::Column(_))
            })
            .map(|(_, value)| value)
            .sum();
        linear + quadratic
    }

    /// Total coefficient value on entries that were elided by compensation
    pub fn elided_mass(&self) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .filter(|(slot, _)| matches!(slot, Slot::Elided))
            .map(|(_, value)| value)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|((row, column), _)| {
                matches!(row, Slot::Elided) || matches!(column, Slot::Elided)
            })
            .map(|(_, value)| value)
            .sum();
        linear + quadratic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_accumulate() {
        let mut expression = Expression::new();
        expression.add_linear_term(0, 1.5);
        expression.add_linear_term(0, 0.5);
        expression.add_linear_term(2, -1.0);
        assert_eq!(expression.linear.get(&0), Some(&2.0));
        assert_eq!(expression.linear.get(&2), Some(&-1.0));
        assert!(!expression.is_quadratic());

        expression.add_quadratic_term(1, 0, 2.0);
        assert!(expression.is_quadratic());
        assert_eq!(expression.quadratic.get(&(1, 0)), Some(&2.0));
    }

    #[test]
    fn bounds_carried() {
        let expression = Expression::with_bounds(None, Some(10.0));
        assert_eq!(expression.lower, None);
        assert_eq!(expression.upper, Some(10.0));
    }
}
