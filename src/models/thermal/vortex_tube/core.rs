mod correlation;
mod dataset;
mod error;
mod fit;

pub use correlation::Coefficients;
pub use dataset::VortexData;
pub use error::FitError;
pub use fit::{FitConfig, FitSummary, fit};
