use uom::si::f64::{Power, ThermodynamicTemperature};

use crate::support::units::TemperatureDifference;

use super::StirlingParameters;

/// Shaft power of the ideal cycle running between `hot_side` and `cold_side`.
///
/// `P = F · m · R_g · (T_h − T_l) · ln(v4 / v3)`
#[must_use]
pub fn power_output(
    parameters: &StirlingParameters,
    hot_side: ThermodynamicTemperature,
    cold_side: ThermodynamicTemperature,
) -> Power {
    parameters.cycle_frequency
        * parameters.gas_mass
        * parameters.gas_constant
        * hot_side.minus(cold_side)
        * parameters.volumes.hot_side_log_ratio()
}
