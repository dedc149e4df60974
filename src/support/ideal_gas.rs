//! Ideal gas relations.
//!
//! Equation of state `p = ρ·R·T` and the isentropic pressure-temperature
//! relation for a calorically perfect gas, shared by the compressor model.

use uom::si::{
    f64::{MassDensity, Pressure, ThermodynamicTemperature},
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::SpecificGasConstant;

/// Computes density using the ideal gas equation of state.
#[must_use]
pub fn density(
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
    gas_constant: SpecificGasConstant,
) -> MassDensity {
    pressure / (gas_constant * temperature)
}

/// Computes the temperature reached by isentropic compression or expansion.
///
/// `T₂ = T₁ · (p₂ / p₁)^((k − 1) / k)` where `k` is the heat capacity ratio.
#[must_use]
pub fn isentropic_temperature(
    inlet_temperature: ThermodynamicTemperature,
    inlet_pressure: Pressure,
    outlet_pressure: Pressure,
    heat_capacity_ratio: f64,
) -> ThermodynamicTemperature {
    let pressure_ratio = (outlet_pressure / inlet_pressure).get::<ratio>();
    let exponent = (heat_capacity_ratio - 1.0) / heat_capacity_ratio;
    ThermodynamicTemperature::new::<kelvin>(
        inlet_temperature.get::<kelvin>() * pressure_ratio.powf(exponent),
    )
}
