//! Process wide defaults for solve configuration
use std::sync::{LazyLock, RwLock};

use crate::optimize::solvers::SolverKind;

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Default wall clock limit for a single optimize call, in seconds
    pub time_limit: f64,
    /// Solver whose log stream should be captured by default
    pub logger_solver: Option<SolverKind>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            time_limit: f64::INFINITY,
            logger_solver: None,
        }
    }
}
