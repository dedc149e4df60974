//! Parallel parameter sweeps.
//!
//! Every point is solved independently. A failed point is kept in place as
//! an `Err` outcome and logged, so one bad point never aborts a sweep.

use rayon::prelude::*;
use tracing::warn;
use uom::si::{
    f64::{HeatFluxDensity, TemperatureInterval, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
};

use crate::{
    models::thermal::{
        solar_stirling::{Environment, SimulationError, SimulationResult, SolarStirling},
        vortex_tube::VortexTube,
    },
    support::constraint::ConstraintResult,
};

use super::{CoolingError, CoolingPoint, SolarCoolingSystem};

/// Wind and ambient conditions held fixed along an irradiance sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub wind_speed: Velocity,
    pub ambient_temperature: ThermodynamicTemperature,
}

impl Conditions {
    fn environment(&self, irradiance: HeatFluxDensity) -> Result<Environment, SimulationError> {
        Environment::new(irradiance, self.wind_speed, self.ambient_temperature)
    }
}

/// Outcome at one irradiance.
#[derive(Debug, Clone, PartialEq)]
pub struct IrradiancePoint<T, E> {
    pub irradiance: HeatFluxDensity,
    pub outcome: Result<T, E>,
}

/// Engine results along an irradiance sweep for one set of conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurve {
    pub conditions: Conditions,
    pub points: Vec<IrradiancePoint<SimulationResult, SimulationError>>,
}

/// Predicted temperature drop at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPoint {
    pub viscosity_ratio: f64,
    pub peclet_number: f64,
    pub outcome: ConstraintResult<TemperatureInterval>,
}

/// Sweeps irradiance for each set of conditions.
///
/// Curves follow the order of `conditions` and points the order of
/// `irradiances`.
#[must_use]
pub fn power_curve(
    engine: &SolarStirling,
    conditions: &[Conditions],
    irradiances: &[HeatFluxDensity],
) -> Vec<PowerCurve> {
    conditions
        .iter()
        .map(|conditions| PowerCurve {
            conditions: *conditions,
            points: irradiances
                .par_iter()
                .map(|&irradiance| {
                    let outcome = conditions
                        .environment(irradiance)
                        .and_then(|environment| engine.simulate(&environment));
                    if let Err(err) = &outcome {
                        warn!(
                            irradiance_w_m2 = irradiance.get::<watt_per_square_meter>(),
                            %err,
                            "power curve point failed"
                        );
                    }
                    IrradiancePoint {
                        irradiance,
                        outcome,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Sweeps the Peclet number at a fixed viscosity ratio.
#[must_use]
pub fn temperature_drop_curve(
    tube: &VortexTube,
    viscosity_ratio: f64,
    peclet_numbers: &[f64],
) -> Vec<DropPoint> {
    peclet_numbers
        .par_iter()
        .map(|&peclet_number| DropPoint {
            viscosity_ratio,
            peclet_number,
            outcome: tube.predict(viscosity_ratio, peclet_number),
        })
        .collect()
}

impl SolarCoolingSystem {
    /// Sweeps irradiance and evaluates cooling performance at each point.
    #[must_use]
    pub fn cooling_curve(
        &self,
        conditions: Conditions,
        irradiances: &[HeatFluxDensity],
    ) -> Vec<IrradiancePoint<CoolingPoint, CoolingError>> {
        irradiances
            .par_iter()
            .map(|&irradiance| {
                let outcome = conditions
                    .environment(irradiance)
                    .map_err(CoolingError::from)
                    .and_then(|environment| self.evaluate(&environment));
                if let Err(err) = &outcome {
                    warn!(
                        irradiance_w_m2 = irradiance.get::<watt_per_square_meter>(),
                        %err,
                        "cooling curve point failed"
                    );
                }
                IrradiancePoint {
                    irradiance,
                    outcome,
                }
            })
            .collect()
    }
}
