//! Core rust implementation of optlink, a crate translating expression
//! based optimization models into native solver tasks and mapping the raw
//! solver results back to model level outcomes.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use optlink_core::model::expression::Expression;
//! use optlink_core::model::model::ExpressionModel;
//! use optlink_core::model::objective::{Objective, ObjectiveSense};
//! use optlink_core::model::variable::VariableType;
//! use optlink_core::optimize::options::SolveOptions;
//! use optlink_core::optimize::session::Session;
//! use optlink_core::optimize::solvers::clarabel::ClarabelSolver;
//! use optlink_core::optimize::Outcome;
//!
//! // minimize x0 + x1 with x0 in [0, 10], x1 in [-5, 5], x0 + x1 <= 10
//! let mut model = ExpressionModel::new_minimization();
//! model
//!     .add_new_variable("x0", VariableType::Continuous, Some(0.0), Some(10.0))
//!     .unwrap();
//! model
//!     .add_new_variable("x1", VariableType::Continuous, Some(-5.0), Some(5.0))
//!     .unwrap();
//!
//! let mut budget = Expression::with_bounds(None, Some(10.0));
//! budget.add_linear_term(0, 1.0);
//! budget.add_linear_term(1, 1.0);
//! model.add_constraint("budget", budget).unwrap();
//!
//! let mut objective = Objective::new(ObjectiveSense::Minimize);
//! objective.add_linear_term(0, 1.0);
//! objective.add_linear_term(1, 1.0);
//! model.set_objective(objective).unwrap();
//!
//! let session = Arc::new(Session::new());
//! let mut solver = ClarabelSolver::build(&model, session, SolveOptions::new()).unwrap();
//! let result = solver.solve();
//! assert_eq!(result.outcome, Outcome::Optimal);
//! ```
pub mod configuration;
pub mod io;
pub mod model;
pub mod optimize;
