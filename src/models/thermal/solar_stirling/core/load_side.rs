//! Load-side energy balance between the engine's cold end and the water loop.

use uom::si::f64::{Energy, Power, TemperatureInterval, ThermodynamicTemperature};

use crate::support::{
    hx::{LogMeanError, log_mean_temperature_difference},
    units::{TemperatureDifference, offset},
};

use super::StirlingParameters;

/// Water temperatures at the load-side heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadTemperatures {
    pub inlet: ThermodynamicTemperature,
    pub outlet: ThermodynamicTemperature,
}

impl LoadTemperatures {
    /// Returns the initial load temperatures for a given water inlet, with the
    /// outlet estimated from the parameter set's outlet rise.
    #[must_use]
    pub fn estimate(parameters: &StirlingParameters, inlet: ThermodynamicTemperature) -> Self {
        Self {
            inlet,
            outlet: offset(inlet, parameters.load_outlet_rise),
        }
    }
}

/// Load-side heat rates evaluated at a candidate intermediate temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSideRates {
    /// Candidate intermediate temperature `T_I`.
    pub intermediate: ThermodynamicTemperature,
    /// Heat the exchanger can pass to the water, `Q̇_L,transfer`.
    pub transfer: Power,
    /// Heat the cycle rejects at `T_I`, `Q̇_L,supplement`.
    pub supplement: Power,
}

impl LoadSideRates {
    /// Returns `supplement - transfer`, which falls as `T_I` rises.
    #[must_use]
    pub fn imbalance(&self) -> Power {
        self.supplement - self.transfer
    }
}

/// Evaluates both load-side heat rates at `intermediate`.
///
/// # Errors
///
/// Returns [`LogMeanError`] when the candidate is not above the water inlet,
/// so the log-mean temperature difference is undefined.
pub fn load_side_rates(
    parameters: &StirlingParameters,
    intermediate: ThermodynamicTemperature,
    load: LoadTemperatures,
) -> Result<LoadSideRates, LogMeanError> {
    let transfer = heat_transfer(parameters, intermediate, load)?;
    let supplement = heat_supplement(parameters, intermediate, load.outlet);

    Ok(LoadSideRates {
        intermediate,
        transfer,
        supplement,
    })
}

/// Heat rejected per unit time by isothermal compression plus regenerator loss.
fn heat_supplement(
    parameters: &StirlingParameters,
    intermediate: ThermodynamicTemperature,
    outlet: ThermodynamicTemperature,
) -> Power {
    let isothermal: Energy = parameters.gas_mass
        * parameters.gas_constant
        * intermediate
        * parameters.volumes.load_side_log_ratio();
    let regenerator: Energy = parameters.gas_mass
        * parameters.gas_cv
        * intermediate.minus(outlet)
        * (1.0 - parameters.regenerator_effectiveness);

    parameters.cycle_frequency * (regenerator + isothermal)
}

fn heat_transfer(
    parameters: &StirlingParameters,
    intermediate: ThermodynamicTemperature,
    load: LoadTemperatures,
) -> Result<Power, LogMeanError> {
    let lmtd = log_mean_temperature_difference(
        intermediate.minus(load.inlet),
        intermediate.minus(load.outlet),
    )?;
    Ok(parameters.load_side_conductance * lmtd)
}

/// Heat carried by the water loop across the estimated load temperatures.
///
/// Negative when the water is heated.
#[must_use]
pub fn load_heat_rate(parameters: &StirlingParameters, load: LoadTemperatures) -> Power {
    parameters.water_mass_rate * parameters.water_cp * load.inlet.minus(load.outlet)
}

/// Load outlet temperature implied by a load heat rate and water inlet.
#[must_use]
pub fn refined_outlet(
    parameters: &StirlingParameters,
    load_heat_rate: Power,
    inlet: ThermodynamicTemperature,
) -> ThermodynamicTemperature {
    let drop: TemperatureInterval =
        load_heat_rate / (parameters.water_mass_rate * parameters.water_cp);
    offset(inlet, -drop)
}
