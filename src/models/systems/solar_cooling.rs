//! Solar-driven vortex-tube cooling.
//!
//! The Stirling engine's shaft power drives an air compressor whose
//! discharge feeds a vortex tube. For one environment:
//!
//! - the engine equilibrium gives the shaft power `P`;
//! - air enters the compressor at ambient temperature unless
//!   [`CoolingParameters::compressor_inlet_temperature`] fixes it, and the
//!   compressed mass flow is `ṁ = P / w_c`;
//! - below the tube's minimum inlet volume flow no cooling is produced;
//!   otherwise the cooling capacity is `Q_c = ṁ · c_p · ΔT_c`.
//!
//! Sweeps over irradiance and over the vortex-tube operating map run in
//! parallel and keep failed points as tagged results.

mod error;
mod report;
mod sweep;

pub use error::CoolingError;
pub use report::{CoolingReport, REPORT_PECLET_NUMBERS, REPORT_VISCOSITY_RATIOS, VortexGridPoint};
pub use sweep::{
    Conditions, DropPoint, IrradiancePoint, PowerCurve, power_curve, temperature_drop_curve,
};

use twine_core::Model;
use uom::{
    ConstZero,
    si::{
        f64::{MassRate, Power, TemperatureInterval, ThermodynamicTemperature, VolumeRate},
        ratio::ratio,
        thermodynamic_temperature::kelvin,
        volume_rate::cubic_meter_per_second,
    },
};

use crate::{
    models::{
        thermal::{
            solar_stirling::{Environment, SimulationResult, SolarStirling},
            vortex_tube::{OperatingPoint, VortexTube},
        },
        turbomachinery::compressor::{Compression, Compressor},
    },
    support::constraint::{NonNegative, StrictlyPositive, require},
};

/// Operating settings of the cooling loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingParameters {
    /// Smallest compressor inlet volume flow the vortex tube can use.
    pub min_volume_rate: VolumeRate,
    /// Viscosity ratio the vortex tube runs at.
    pub viscosity_ratio: f64,
    /// Peclet number the vortex tube runs at.
    pub peclet_number: f64,
    /// Compressor inlet temperature, or `None` to draw air at ambient.
    pub compressor_inlet_temperature: Option<ThermodynamicTemperature>,
}

impl CoolingParameters {
    #[must_use]
    pub fn reference() -> Self {
        Self {
            min_volume_rate: VolumeRate::new::<cubic_meter_per_second>(0.00466),
            viscosity_ratio: 0.37,
            peclet_number: 6.92,
            compressor_inlet_temperature: None,
        }
    }
}

impl Default for CoolingParameters {
    fn default() -> Self {
        Self::reference()
    }
}

/// Cooling performance at one environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingPoint {
    pub solar: SimulationResult,
    pub compression: Compression,
    /// Air mass flow the engine can compress.
    pub air_mass_rate: MassRate,
    /// Air volume flow at the compressor inlet.
    pub air_volume_rate: VolumeRate,
    /// True when the inlet volume flow is below the tube's minimum.
    pub flow_limited: bool,
    pub temperature_drop: TemperatureInterval,
    pub cold_outlet_temperature: ThermodynamicTemperature,
    pub cooling_capacity: Power,
    /// Cooling capacity per unit shaft power.
    pub coefficient_of_performance: f64,
    /// Cooling capacity per unit of concentrated solar input.
    pub total_efficiency: f64,
}

/// The coupled engine, compressor and vortex tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoolingSystem {
    engine: SolarStirling,
    compressor: Compressor,
    tube: VortexTube,
    cooling: CoolingParameters,
    operating_point: OperatingPoint,
}

impl SolarCoolingSystem {
    /// Assembles a system.
    ///
    /// # Errors
    ///
    /// Returns [`CoolingError::OutOfDomain`] if the minimum volume flow is
    /// negative or the vortex-tube operating point is not strictly positive.
    pub fn new(
        engine: SolarStirling,
        compressor: Compressor,
        tube: VortexTube,
        cooling: CoolingParameters,
    ) -> Result<Self, CoolingError> {
        require::<NonNegative>(
            "minimum volume flow",
            cooling.min_volume_rate.get::<cubic_meter_per_second>(),
        )?;
        if let Some(inlet) = cooling.compressor_inlet_temperature {
            require::<StrictlyPositive>("compressor inlet temperature", inlet.get::<kelvin>())?;
        }

        let operating_point = OperatingPoint::new(cooling.viscosity_ratio, cooling.peclet_number)
            .map_err(|err| CoolingError::OutOfDomain {
                context: format!("vortex tube operating point: {err}"),
            })?;

        Ok(Self {
            engine,
            compressor,
            tube,
            cooling,
            operating_point,
        })
    }

    /// Reference engine, air compressor, fitted tube and cooling settings.
    ///
    /// # Errors
    ///
    /// Returns [`CoolingError::Fit`] if the reference vortex-tube fit failed.
    pub fn reference() -> Result<Self, CoolingError> {
        Self::new(
            SolarStirling::reference(),
            Compressor::reference(),
            *VortexTube::reference()?,
            CoolingParameters::reference(),
        )
    }

    #[must_use]
    pub fn engine(&self) -> &SolarStirling {
        &self.engine
    }

    #[must_use]
    pub fn compressor(&self) -> &Compressor {
        &self.compressor
    }

    #[must_use]
    pub fn tube(&self) -> &VortexTube {
        &self.tube
    }

    #[must_use]
    pub fn cooling(&self) -> &CoolingParameters {
        &self.cooling
    }

    /// Temperature at which air enters the compressor in `environment`.
    #[must_use]
    pub fn compressor_inlet_temperature(&self, environment: &Environment) -> ThermodynamicTemperature {
        self.cooling
            .compressor_inlet_temperature
            .unwrap_or_else(|| environment.ambient_temperature())
    }

    /// Evaluates cooling performance at `environment`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoolingError`] if the engine or compressor model fails.
    pub fn evaluate(&self, environment: &Environment) -> Result<CoolingPoint, CoolingError> {
        let solar = self.engine.simulate(environment)?;
        let ambient = environment.ambient_temperature();
        let compression = self
            .compressor
            .compress(self.compressor_inlet_temperature(environment))?;

        let power = solar.power;
        let air_mass_rate: MassRate = if power > Power::ZERO {
            power / compression.specific_work
        } else {
            MassRate::ZERO
        };
        let air_volume_rate: VolumeRate = air_mass_rate / compression.inlet_density;
        let flow_limited = air_volume_rate < self.cooling.min_volume_rate;

        let temperature_drop = self.tube.temperature_drop(self.operating_point);
        let cold_outlet_temperature = self.tube.cold_outlet_temperature(ambient, self.operating_point);

        let cooling_capacity: Power = if flow_limited {
            Power::ZERO
        } else {
            air_mass_rate * self.compressor.parameters().cp * temperature_drop
        };

        let coefficient_of_performance = if power > Power::ZERO {
            (cooling_capacity / power).get::<ratio>()
        } else {
            0.0
        };

        let parameters = self.engine.parameters();
        let collected: Power = environment.irradiance()
            * parameters.receiver_area
            * parameters.concentration_ratio;
        let total_efficiency = if collected > Power::ZERO {
            (cooling_capacity / collected).get::<ratio>()
        } else {
            0.0
        };

        Ok(CoolingPoint {
            solar,
            compression,
            air_mass_rate,
            air_volume_rate,
            flow_limited,
            temperature_drop,
            cold_outlet_temperature,
            cooling_capacity,
            coefficient_of_performance,
            total_efficiency,
        })
    }
}

impl Model for SolarCoolingSystem {
    type Input = Environment;
    type Output = CoolingPoint;
    type Error = CoolingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{HeatFluxDensity, Velocity},
        heat_flux_density::watt_per_square_meter,
        mass_rate::kilogram_per_second,
        power::watt,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin,
        velocity::meter_per_second,
    };

    use crate::models::thermal::solar_stirling::SimulationError;

    fn environment(irradiance: f64) -> Environment {
        Environment::new(
            HeatFluxDensity::new::<watt_per_square_meter>(irradiance),
            Velocity::new::<meter_per_second>(0.0),
            ThermodynamicTemperature::new::<kelvin>(293.15),
        )
        .unwrap()
    }

    #[test]
    fn reference_cooling_point() {
        let system = SolarCoolingSystem::reference().unwrap();
        let point = system.evaluate(&environment(700.0)).unwrap();

        assert!(!point.flow_limited);
        assert_relative_eq!(
            point.air_mass_rate.get::<kilogram_per_second>(),
            0.1520,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            point.air_volume_rate.get::<cubic_meter_per_second>(),
            0.1279,
            epsilon = 1e-3
        );
        assert_relative_eq!(point.temperature_drop.get::<delta_kelvin>(), 14.496, epsilon = 0.01);
        assert_relative_eq!(point.cooling_capacity.get::<watt>(), 2212.3, epsilon = 3.0);
        assert_relative_eq!(point.coefficient_of_performance, 0.1341, epsilon = 1e-3);
        assert_relative_eq!(point.total_efficiency, 0.0515, epsilon = 1e-3);
        assert_relative_eq!(
            point.cold_outlet_temperature.get::<kelvin>(),
            293.15 - point.temperature_drop.get::<delta_kelvin>(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn weak_sun_is_flow_limited() {
        let system = SolarCoolingSystem::reference().unwrap();
        let point = system.evaluate(&environment(215.0)).unwrap();

        assert!(point.solar.power > Power::ZERO);
        assert!(point.flow_limited);
        assert_eq!(point.cooling_capacity, Power::ZERO);
        assert_eq!(point.coefficient_of_performance, 0.0);
        assert_eq!(point.total_efficiency, 0.0);
    }

    #[test]
    fn engine_failure_propagates() {
        let system = SolarCoolingSystem::reference().unwrap();
        let err = system.evaluate(&environment(0.0)).unwrap_err();

        assert!(matches!(
            err,
            CoolingError::Simulation(SimulationError::SecondLawViolation { .. })
        ));
    }

    #[test]
    fn rejects_invalid_operating_point() {
        let result = SolarCoolingSystem::new(
            SolarStirling::reference(),
            Compressor::reference(),
            *VortexTube::reference().unwrap(),
            CoolingParameters {
                viscosity_ratio: 0.0,
                ..CoolingParameters::reference()
            },
        );

        assert!(matches!(result, Err(CoolingError::OutOfDomain { .. })));
    }

    #[test]
    fn fixed_compressor_inlet_overrides_ambient() {
        let cooling = CoolingParameters {
            compressor_inlet_temperature: Some(ThermodynamicTemperature::new::<kelvin>(298.0)),
            ..CoolingParameters::reference()
        };
        let system = SolarCoolingSystem::new(
            SolarStirling::reference(),
            Compressor::reference(),
            *VortexTube::reference().unwrap(),
            cooling,
        )
        .unwrap();

        let point = system.evaluate(&environment(700.0)).unwrap();

        assert_relative_eq!(
            point.compression.outlet_temperature.get::<kelvin>(),
            407.88,
            epsilon = 0.01
        );
        // The tube still draws ambient air.
        assert_relative_eq!(
            point.cold_outlet_temperature.get::<kelvin>(),
            293.15 - point.temperature_drop.get::<delta_kelvin>(),
            epsilon = 1e-9
        );

        let frozen = CoolingParameters {
            compressor_inlet_temperature: Some(ThermodynamicTemperature::new::<kelvin>(0.0)),
            ..CoolingParameters::reference()
        };
        assert!(matches!(
            SolarCoolingSystem::new(
                SolarStirling::reference(),
                Compressor::reference(),
                *VortexTube::reference().unwrap(),
                frozen,
            ),
            Err(CoolingError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn more_sun_cools_more() {
        let system = SolarCoolingSystem::reference().unwrap();
        let low = system.evaluate(&environment(600.0)).unwrap();
        let high = system.evaluate(&environment(900.0)).unwrap();

        assert!(high.cooling_capacity > low.cooling_capacity);
        assert_eq!(system.call(&environment(600.0)).unwrap(), low);
    }
}
