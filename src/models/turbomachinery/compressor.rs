//! Isentropic compressor for a calorically perfect ideal gas.
//!
//! Compression from `p1` to `p2` follows `T2 = T1 · (p2 / p1)^((k − 1) / k)`
//! and costs `w = c_p · (T2 − T1)` per unit mass. Densities come from the
//! ideal gas equation of state at each end.

use thiserror::Error;
use twine_core::Model;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{AvailableEnergy, MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    pressure::{kilopascal, pascal},
    specific_heat_capacity::{joule_per_kilogram_kelvin, kilojoule_per_kilogram_kelvin},
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{StrictlyPositive, Violation, require},
    ideal_gas::{density, isentropic_temperature},
    units::{SpecificGasConstant, TemperatureDifference},
};

/// Errors from the compressor model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompressorError {
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },
}

impl From<Violation> for CompressorError {
    fn from(violation: Violation) -> Self {
        Self::OutOfDomain {
            context: violation.to_string(),
        }
    }
}

/// Gas properties and pressure levels of the compressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorParameters {
    pub inlet_pressure: Pressure,
    pub outlet_pressure: Pressure,
    /// Heat capacity ratio `k = c_p / c_v`.
    pub heat_capacity_ratio: f64,
    pub gas_constant: SpecificGasConstant,
    pub cp: SpecificHeatCapacity,
}

impl CompressorParameters {
    /// Air compressed from 100 kPa to 300 kPa.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            inlet_pressure: Pressure::new::<kilopascal>(100.0),
            outlet_pressure: Pressure::new::<kilopascal>(300.0),
            heat_capacity_ratio: 1.4,
            gas_constant: SpecificGasConstant::new::<kilojoule_per_kilogram_kelvin>(0.287),
            cp: SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(1.004),
        }
    }
}

impl Default for CompressorParameters {
    fn default() -> Self {
        Self::reference()
    }
}

/// State change across the compressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compression {
    pub inlet_temperature: ThermodynamicTemperature,
    pub outlet_temperature: ThermodynamicTemperature,
    /// Work input per unit mass of gas.
    pub specific_work: AvailableEnergy,
    pub inlet_density: MassDensity,
    pub outlet_density: MassDensity,
}

/// An ideal-gas isentropic compressor with validated parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    parameters: CompressorParameters,
}

impl Compressor {
    /// Creates a compressor.
    ///
    /// # Errors
    ///
    /// Returns [`CompressorError::OutOfDomain`] if a pressure, the gas
    /// constant or `c_p` is not strictly positive, or `k` is not above one.
    pub fn new(parameters: CompressorParameters) -> Result<Self, CompressorError> {
        require::<StrictlyPositive>("inlet pressure", parameters.inlet_pressure.get::<pascal>())?;
        require::<StrictlyPositive>("outlet pressure", parameters.outlet_pressure.get::<pascal>())?;
        require::<StrictlyPositive>(
            "gas constant",
            parameters.gas_constant.get::<joule_per_kilogram_kelvin>(),
        )?;
        require::<StrictlyPositive>("cp", parameters.cp.get::<joule_per_kilogram_kelvin>())?;

        let k = parameters.heat_capacity_ratio;
        if !(k.is_finite() && k > 1.0) {
            return Err(CompressorError::OutOfDomain {
                context: format!("heat capacity ratio must exceed one, got {k}"),
            });
        }

        Ok(Self { parameters })
    }

    #[must_use]
    pub fn reference() -> Self {
        Self {
            parameters: CompressorParameters::reference(),
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &CompressorParameters {
        &self.parameters
    }

    /// Compresses gas entering at `inlet_temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`CompressorError::OutOfDomain`] if the inlet temperature is not
    /// finite and positive.
    pub fn compress(
        &self,
        inlet_temperature: ThermodynamicTemperature,
    ) -> Result<Compression, CompressorError> {
        require::<StrictlyPositive>("inlet temperature", inlet_temperature.get::<kelvin>())?;

        let p = &self.parameters;
        let outlet_temperature = isentropic_temperature(
            inlet_temperature,
            p.inlet_pressure,
            p.outlet_pressure,
            p.heat_capacity_ratio,
        );
        let specific_work: AvailableEnergy = p.cp * outlet_temperature.minus(inlet_temperature);

        Ok(Compression {
            inlet_temperature,
            outlet_temperature,
            specific_work,
            inlet_density: density(inlet_temperature, p.inlet_pressure, p.gas_constant),
            outlet_density: density(outlet_temperature, p.outlet_pressure, p.gas_constant),
        })
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::reference()
    }
}

impl Model for Compressor {
    type Input = ThermodynamicTemperature;
    type Output = Compression;
    type Error = CompressorError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.compress(*input)
    }
}

impl Compression {
    /// Specific work in J/kg.
    #[must_use]
    pub fn specific_work_j_per_kg(&self) -> f64 {
        self.specific_work.get::<joule_per_kilogram>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{available_energy::kilojoule_per_kilogram, mass_density::kilogram_per_cubic_meter};

    #[test]
    fn reference_air_compression() {
        let state = Compressor::reference()
            .compress(ThermodynamicTemperature::new::<kelvin>(298.0))
            .unwrap();

        assert_relative_eq!(state.outlet_temperature.get::<kelvin>(), 407.88, epsilon = 0.01);
        assert_relative_eq!(
            state.specific_work.get::<kilojoule_per_kilogram>(),
            110.32,
            epsilon = 0.01
        );
        assert_relative_eq!(
            state.inlet_density.get::<kilogram_per_cubic_meter>(),
            1.1692,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            state.outlet_density.get::<kilogram_per_cubic_meter>(),
            2.5628,
            epsilon = 1e-4
        );
        assert_relative_eq!(state.specific_work_j_per_kg(), 110_320.0, epsilon = 10.0);
    }

    #[test]
    fn no_pressure_rise_costs_nothing() {
        let compressor = Compressor::new(CompressorParameters {
            outlet_pressure: Pressure::new::<kilopascal>(100.0),
            ..CompressorParameters::reference()
        })
        .unwrap();

        let state = compressor
            .compress(ThermodynamicTemperature::new::<kelvin>(293.15))
            .unwrap();

        assert_relative_eq!(state.outlet_temperature.get::<kelvin>(), 293.15, epsilon = 1e-9);
        assert_relative_eq!(state.specific_work_j_per_kg(), 0.0, epsilon = 1e-9);
        assert_eq!(state.inlet_density, state.outlet_density);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let cases = [
            CompressorParameters {
                inlet_pressure: Pressure::new::<kilopascal>(0.0),
                ..CompressorParameters::reference()
            },
            CompressorParameters {
                outlet_pressure: Pressure::new::<kilopascal>(-300.0),
                ..CompressorParameters::reference()
            },
            CompressorParameters {
                heat_capacity_ratio: 1.0,
                ..CompressorParameters::reference()
            },
            CompressorParameters {
                cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(f64::NAN),
                ..CompressorParameters::reference()
            },
        ];

        for parameters in cases {
            assert!(matches!(
                Compressor::new(parameters),
                Err(CompressorError::OutOfDomain { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_inlet_temperature() {
        let compressor = Compressor::reference();
        for t in [0.0, -5.0, f64::NAN] {
            assert!(compressor.compress(ThermodynamicTemperature::new::<kelvin>(t)).is_err());
        }
    }

    #[test]
    fn model_call_matches_compress() {
        let compressor = Compressor::reference();
        let t = ThermodynamicTemperature::new::<kelvin>(293.15);
        assert_eq!(compressor.call(&t).unwrap(), compressor.compress(t).unwrap());
    }
}
