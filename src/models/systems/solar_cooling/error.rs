use thiserror::Error;

use crate::{
    models::{
        thermal::{solar_stirling::SimulationError, vortex_tube::FitError},
        turbomachinery::compressor::CompressorError,
    },
    support::constraint::Violation,
};

/// Errors from evaluating the coupled cooling system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoolingError {
    /// The engine equilibrium could not be solved.
    #[error("solar Stirling simulation failed")]
    Simulation(#[from] SimulationError),

    /// The vortex-tube correlation could not be fitted.
    #[error("vortex tube fit failed")]
    Fit(#[from] FitError),

    #[error("compressor failed")]
    Compressor(#[from] CompressorError),

    /// A system parameter lies outside its physical domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },
}

impl From<Violation> for CoolingError {
    fn from(violation: Violation) -> Self {
        Self::OutOfDomain {
            context: violation.to_string(),
        }
    }
}
