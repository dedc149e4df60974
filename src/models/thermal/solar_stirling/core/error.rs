use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use crate::support::{constraint::Violation, root_finding::RootFindingError};

/// Errors that can occur while solving the engine equilibrium.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// An input or constant lies outside its physical domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The bisection solver for the intermediate temperature failed.
    ///
    /// Reaching the iteration cap is not an error; this covers malformed
    /// brackets and residual evaluation failures reported by the solver.
    #[error("intermediate temperature bisection failed: {context}")]
    Bisection { context: String },

    /// The receiver energy balance did not converge.
    #[error("hot side balance did not converge from seed {seed:?}")]
    HotSideConvergence {
        /// Temperature the root finder was started from.
        seed: ThermodynamicTemperature,
        #[source]
        source: RootFindingError,
    },

    /// The hot side root is not hotter than the intermediate temperature.
    #[error("second law violation: hot side {hot_side:?} is not above intermediate {intermediate:?}")]
    SecondLawViolation {
        intermediate: ThermodynamicTemperature,
        hot_side: ThermodynamicTemperature,
    },
}

impl SimulationError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }
}

impl From<Violation> for SimulationError {
    fn from(violation: Violation) -> Self {
        Self::out_of_domain(violation.to_string())
    }
}
