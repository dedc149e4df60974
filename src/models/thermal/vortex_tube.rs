//! Vortex-tube cooling from a fitted empirical correlation.
//!
//! A [`VortexTube`] holds coefficients fitted to measured cold-end
//! temperature drops and predicts the drop at any operating point.
//! The fit runs once; predictions only read the coefficients, so a tube can
//! be shared freely across threads.
//!
//! [`VortexTube::reference`] fits the published data set on first use and
//! returns the same instance to every caller afterwards.

mod core;

pub use self::core::{Coefficients, FitConfig, FitError, FitSummary, VortexData, fit};

use std::{convert::Infallible, sync::OnceLock};

use twine_core::Model;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintResult, StrictlyPositive},
    units::offset,
};

/// Viscosity ratio and Peclet number at which the tube operates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    viscosity_ratio: Constrained<f64, StrictlyPositive>,
    peclet_number: Constrained<f64, StrictlyPositive>,
}

impl OperatingPoint {
    /// Creates an operating point.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not strictly positive.
    pub fn new(viscosity_ratio: f64, peclet_number: f64) -> ConstraintResult<Self> {
        Ok(Self {
            viscosity_ratio: StrictlyPositive::new(viscosity_ratio)?,
            peclet_number: StrictlyPositive::new(peclet_number)?,
        })
    }

    #[must_use]
    pub fn viscosity_ratio(&self) -> f64 {
        *self.viscosity_ratio.as_ref()
    }

    #[must_use]
    pub fn peclet_number(&self) -> f64 {
        *self.peclet_number.as_ref()
    }
}

/// A vortex tube described by a fitted temperature-drop correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexTube {
    summary: FitSummary,
    reference_temperature: ThermodynamicTemperature,
}

static REFERENCE: OnceLock<Result<VortexTube, FitError>> = OnceLock::new();

impl VortexTube {
    /// Fits a tube to measured data.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if the data is degenerate or the fit fails.
    pub fn fit(data: &VortexData, config: &FitConfig) -> Result<Self, FitError> {
        Ok(Self {
            summary: fit(data, config)?,
            reference_temperature: data.reference_temperature(),
        })
    }

    /// The tube fitted to [`VortexData::reference`].
    ///
    /// The fit runs at most once per process, even under concurrent first use.
    ///
    /// # Errors
    ///
    /// Returns the [`FitError`] from the one-time fit if it failed.
    pub fn reference() -> Result<&'static Self, FitError> {
        REFERENCE
            .get_or_init(|| Self::fit(&VortexData::reference(), &FitConfig::default()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Creates a tube from known coefficients.
    #[must_use]
    pub fn from_coefficients(
        coefficients: Coefficients,
        reference_temperature: ThermodynamicTemperature,
    ) -> Self {
        Self {
            summary: FitSummary {
                coefficients,
                cost: 0.0,
                iters: 0,
            },
            reference_temperature,
        }
    }

    #[must_use]
    pub fn coefficients(&self) -> &Coefficients {
        &self.summary.coefficients
    }

    #[must_use]
    pub fn summary(&self) -> &FitSummary {
        &self.summary
    }

    #[must_use]
    pub fn reference_temperature(&self) -> ThermodynamicTemperature {
        self.reference_temperature
    }

    /// Predicted cold-end temperature drop at `point`.
    #[must_use]
    pub fn temperature_drop(&self, point: OperatingPoint) -> TemperatureInterval {
        let normalized = self
            .summary
            .coefficients
            .normalized_drop(point.viscosity_ratio(), point.peclet_number());
        TemperatureInterval::new::<delta_kelvin>(
            normalized * self.reference_temperature.get::<kelvin>(),
        )
    }

    /// Predicted temperature drop for raw correlation inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if either input is not strictly positive.
    pub fn predict(
        &self,
        viscosity_ratio: f64,
        peclet_number: f64,
    ) -> ConstraintResult<TemperatureInterval> {
        Ok(self.temperature_drop(OperatingPoint::new(viscosity_ratio, peclet_number)?))
    }

    /// Cold outlet temperature for air entering at `inlet`.
    #[must_use]
    pub fn cold_outlet_temperature(
        &self,
        inlet: ThermodynamicTemperature,
        point: OperatingPoint,
    ) -> ThermodynamicTemperature {
        offset(inlet, -self.temperature_drop(point))
    }
}

impl Model for VortexTube {
    type Input = OperatingPoint;
    type Output = TemperatureInterval;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.temperature_drop(*input))
    }
}
