//! Module providing representation of optimization model variables
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// A single decision variable of an [`ExpressionModel`](crate::model::model::ExpressionModel)
///
/// # Examples
/// ```rust
/// use optlink_core::model::variable::{VariableBuilder, VariableType};
/// let x = VariableBuilder::default()
///     .id("x")
///     .variable_type(VariableType::Continuous)
///     .lower(0.0)
///     .upper(20.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Variable {
    /// Identifier of the variable, unique within a model
    #[builder(setter(into))]
    pub id: String,
    /// Optional human readable name
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    /// Type of the variable, see [`VariableType`]
    #[builder(default = "VariableType::Continuous")]
    pub variable_type: VariableType,
    /// Lower limit, absent means unbounded below
    #[builder(default, setter(strip_option))]
    pub lower: Option<f64>,
    /// Upper limit, absent means unbounded above
    #[builder(default, setter(strip_option))]
    pub upper: Option<f64>,
    /// Position in the model, assigned when the variable is added
    #[builder(default)]
    pub index: usize,
}

impl Variable {
    pub fn is_integer(&self) -> bool {
        self.variable_type == VariableType::Integer
    }

    /// A variable whose two limits are present and numerically equal is
    /// pinned to that constant and does not become a solver column.
    pub fn is_fixed(&self) -> bool {
        self.fixed_value().is_some()
    }

    /// The constant this variable is pinned to, if any
    pub fn fixed_value(&self) -> Option<f64> {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) if lower == upper => Some(lower),
            _ => None,
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", name, self.variable_type),
            None => write!(f, "{}:{}", self.id, self.variable_type),
        }
    }
}

/// Represents the type of a variable in an optimization model
///
/// # Notes:
/// Integer variables are registered on the task as integer columns, whether
/// the native solver can handle them is decided at solve time
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VariableType {
    /// Continuous variable
    Continuous,
    /// Integer variable
    Integer,
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "CONTINUOUS"),
            VariableType::Integer => write!(f, "INTEGER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_variable() {
        let x = VariableBuilder::default()
            .id("x")
            .lower(0.0)
            .upper(10.0)
            .build()
            .unwrap();
        assert_eq!(x.id, "x");
        assert_eq!(x.variable_type, VariableType::Continuous);
        assert!(!x.is_fixed());
        assert!(!x.is_integer());
    }

    #[test]
    fn unbounded_sides_default_to_none() {
        let x = VariableBuilder::default().id("x").build().unwrap();
        assert_eq!(x.lower, None);
        assert_eq!(x.upper, None);
        assert!(!x.is_fixed());
    }

    #[test]
    fn equal_limits_pin_the_variable() {
        let x = VariableBuilder::default()
            .id("x")
            .lower(3.0)
            .upper(3.0)
            .build()
            .unwrap();
        assert!(x.is_fixed());
        assert_eq!(x.fixed_value(), Some(3.0));

        // Close is not equal, classification is exact
        let y = VariableBuilder::default()
            .id("y")
            .lower(3.0)
            .upper(3.0 + 1e-12)
            .build()
            .unwrap();
        assert!(!y.is_fixed());
    }
}
