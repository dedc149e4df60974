use tracing::debug;
use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::kilowatt,
};

use crate::support::root_finding::{Newton, RootFinder};

use super::{
    Environment, SimulationError, StirlingParameters,
    hot_side::{heat_supplement, solve_hot_side_temperature},
    intermediate::{Convergence, IntermediateConfig, solve_intermediate_temperature},
    load_side::{LoadTemperatures, load_heat_rate, refined_outlet},
    power::power_output,
};

/// Numerical settings for one simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationConfig {
    pub intermediate: IntermediateConfig,
    pub hot_side: Newton,
}

/// Outcome of one simulation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Shaft power `P`.
    pub power: Power,
    /// Net receiver heat at `T_h`, `Q̇_H,supplement`.
    pub hot_side_supplement: Power,
    pub sky_temperature: ThermodynamicTemperature,
    /// Intermediate temperature `T_I`, also the cycle's cold temperature.
    pub intermediate_temperature: ThermodynamicTemperature,
    /// Hot-side temperature `T_h`.
    pub hot_side_temperature: ThermodynamicTemperature,
    /// Water loop heat rate, negative when the water is heated.
    pub load_heat_rate: Power,
    /// Load outlet temperature recomputed from the water loop balance.
    ///
    /// It is reported but not fed back into the intermediate search.
    pub load_outlet_temperature: ThermodynamicTemperature,
    pub intermediate_convergence: Convergence,
}

/// Runs one simulation point.
///
/// The water enters the load side at ambient temperature and its outlet is
/// estimated from the parameter set's outlet rise.
/// `T_I` is solved once against that estimate, then `T_h` is solved against
/// `T_I` and the power follows from the pair.
pub(crate) fn run_simulation(
    parameters: &StirlingParameters,
    environment: &Environment,
    intermediate_config: &IntermediateConfig,
    root_finder: &impl RootFinder,
) -> Result<SimulationResult, SimulationError> {
    let sky_temperature = environment.sky_temperature();
    let load = LoadTemperatures::estimate(parameters, environment.ambient_temperature());

    let intermediate = solve_intermediate_temperature(parameters, load, intermediate_config)?;

    let load_heat_rate = load_heat_rate(parameters, load);
    let load_outlet_temperature = refined_outlet(parameters, load_heat_rate, load.inlet);

    let hot_side_temperature = solve_hot_side_temperature(
        parameters,
        environment,
        intermediate.temperature,
        root_finder,
    )?;

    let power = power_output(parameters, hot_side_temperature, intermediate.temperature);
    let hot_side_supplement = heat_supplement(parameters, environment, hot_side_temperature);

    debug!(power_kw = power.get::<kilowatt>(), "simulation point solved");

    Ok(SimulationResult {
        power,
        hot_side_supplement,
        sky_temperature,
        intermediate_temperature: intermediate.temperature,
        hot_side_temperature,
        load_heat_rate,
        load_outlet_temperature,
        intermediate_convergence: intermediate.convergence,
    })
}
