use thiserror::Error;

use crate::support::{constraint::Violation, least_squares::LeastSquaresError};

/// Errors that can occur while fitting the vortex-tube correlation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// The experimental data is malformed.
    #[error("invalid fit data: {context}")]
    InvalidData { context: String },

    /// The data cannot determine the correlation.
    #[error("degenerate fit data: {context}")]
    Degenerate { context: String },

    /// The least-squares solve failed.
    #[error("correlation fit did not converge")]
    NoConvergence(#[from] LeastSquaresError),
}

impl FitError {
    pub(super) fn invalid(context: impl Into<String>) -> Self {
        Self::InvalidData {
            context: context.into(),
        }
    }

    pub(super) fn degenerate(context: impl Into<String>) -> Self {
        Self::Degenerate {
            context: context.into(),
        }
    }
}

impl From<Violation> for FitError {
    fn from(violation: Violation) -> Self {
        Self::invalid(violation.to_string())
    }
}
