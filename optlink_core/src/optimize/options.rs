//! Solve options and the ordered configurator chain
use std::fmt;

use clarabel::solver::DefaultSettings;

use crate::configuration::CONFIGURATION;
use crate::optimize::session::Session;
use crate::optimize::solvers::SolverKind;

/// A configuration callback applied to the native settings after the
/// baseline. Callbacks run in the order they were added and all receive the
/// same (session, settings, options) triple.
pub type Configurator =
    Box<dyn Fn(&Session, &mut DefaultSettings<f64>, &SolveOptions) + Send + Sync>;

/// Options of one solve call.
///
/// Defaults come from the global [`CONFIGURATION`]; the baseline
/// configurator applies `time_limit` and gates native log output on whether
/// `logger_solver` names the solver doing the work.
pub struct SolveOptions {
    /// Wall clock limit for the optimize call, in seconds
    pub time_limit: f64,
    /// Solver whose log stream should be captured, if any
    pub logger_solver: Option<SolverKind>,
    /// User configurators, applied in order after the baseline
    pub configurators: Vec<Configurator>,
}

impl SolveOptions {
    pub fn new() -> Self {
        let configuration = CONFIGURATION.read().unwrap();
        Self {
            time_limit: configuration.time_limit,
            logger_solver: configuration.logger_solver,
            configurators: Vec::new(),
        }
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_logger(mut self, solver: SolverKind) -> Self {
        self.logger_solver = Some(solver);
        self
    }

    /// Append a configurator to the chain
    pub fn with_configurator(
        mut self,
        configurator: impl Fn(&Session, &mut DefaultSettings<f64>, &SolveOptions) + Send + Sync + 'static,
    ) -> Self {
        self.configurators.push(Box::new(configurator));
        self
    }

    /// Whether log output of the given solver should be captured
    pub fn logs_to(&self, solver: SolverKind) -> bool {
        self.logger_solver == Some(solver)
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveOptions")
            .field("time_limit", &self.time_limit)
            .field("logger_solver", &self.logger_solver)
            .field("configurators", &self.configurators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_style_updates() {
        let options = SolveOptions::new()
            .with_time_limit(60.0)
            .with_logger(SolverKind::Clarabel);
        assert_eq!(options.time_limit, 60.0);
        assert!(options.logs_to(SolverKind::Clarabel));
    }

    #[test]
    fn logging_defaults_off() {
        let options = SolveOptions::new();
        assert!(!options.logs_to(SolverKind::Clarabel));
    }

    #[test]
    fn configurators_are_kept_in_insertion_order() {
        let options = SolveOptions::new()
            .with_configurator(|_, settings, _| settings.max_iter = 1)
            .with_configurator(|_, settings, _| settings.max_iter = 7);
        let session = Session::new();
        let mut settings = DefaultSettings::default();
        for configurator in &options.configurators {
            configurator(&session, &mut settings, &options);
        }
        // The later configurator wins
        assert_eq!(settings.max_iter, 7);
    }
}
