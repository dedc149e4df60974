//! Cooling-system report over the vortex-tube operating map.

use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature};

use crate::models::{
    thermal::{
        solar_stirling::{Environment, SimulationResult},
        vortex_tube::OperatingPoint,
    },
    turbomachinery::compressor::Compression,
};

use super::{CoolingError, SolarCoolingSystem};

/// Viscosity ratios of the standard report grid.
pub const REPORT_VISCOSITY_RATIOS: [f64; 4] = [0.35, 0.45, 0.55, 0.65];

/// Peclet numbers of the standard report grid.
pub const REPORT_PECLET_NUMBERS: [f64; 4] = [4.0, 5.0, 6.0, 7.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexGridPoint {
    pub viscosity_ratio: f64,
    pub peclet_number: f64,
    pub temperature_drop: TemperatureInterval,
    pub cold_outlet_temperature: ThermodynamicTemperature,
}

/// Compressor state, engine result and vortex-tube map at one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct CoolingReport {
    pub compression: Compression,
    pub solar: SimulationResult,
    /// Grid points, viscosity ratio major.
    pub vortex: Vec<VortexGridPoint>,
}

impl SolarCoolingSystem {
    /// Builds a report on the given operating map.
    ///
    /// Air enters the compressor at `compressor_inlet` and the vortex tube at
    /// ambient temperature.
    ///
    /// # Errors
    ///
    /// Returns [`CoolingError::OutOfDomain`] for a non-positive grid value, or
    /// the engine or compressor error.
    pub fn report(
        &self,
        environment: &Environment,
        compressor_inlet: ThermodynamicTemperature,
        viscosity_ratios: &[f64],
        peclet_numbers: &[f64],
    ) -> Result<CoolingReport, CoolingError> {
        let ambient = environment.ambient_temperature();
        let compression = self.compressor().compress(compressor_inlet)?;
        let solar = self.engine().simulate(environment)?;

        let mut vortex = Vec::with_capacity(viscosity_ratios.len() * peclet_numbers.len());
        for &viscosity_ratio in viscosity_ratios {
            for &peclet_number in peclet_numbers {
                let point = OperatingPoint::new(viscosity_ratio, peclet_number).map_err(|err| {
                    CoolingError::OutOfDomain {
                        context: format!(
                            "report grid point (μ={viscosity_ratio}, Pe={peclet_number}): {err}"
                        ),
                    }
                })?;
                vortex.push(VortexGridPoint {
                    viscosity_ratio,
                    peclet_number,
                    temperature_drop: self.tube().temperature_drop(point),
                    cold_outlet_temperature: self.tube().cold_outlet_temperature(ambient, point),
                });
            }
        }

        Ok(CoolingReport {
            compression,
            solar,
            vortex,
        })
    }

    /// Builds a report on the standard 4 × 4 operating map, with the
    /// compressor inlet from [`compressor_inlet_temperature`](Self::compressor_inlet_temperature).
    ///
    /// # Errors
    ///
    /// See [`report`](Self::report).
    pub fn simulate_cooling_system(
        &self,
        environment: &Environment,
    ) -> Result<CoolingReport, CoolingError> {
        self.report(
            environment,
            self.compressor_inlet_temperature(environment),
            &REPORT_VISCOSITY_RATIOS,
            &REPORT_PECLET_NUMBERS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram,
        f64::{HeatFluxDensity, Velocity},
        heat_flux_density::watt_per_square_meter,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin,
        velocity::meter_per_second,
    };

    fn temp(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    fn environment() -> Environment {
        Environment::new(
            HeatFluxDensity::new::<watt_per_square_meter>(700.0),
            Velocity::new::<meter_per_second>(0.0),
            ThermodynamicTemperature::new::<kelvin>(293.15),
        )
        .unwrap()
    }

    #[test]
    fn standard_report() {
        let system = SolarCoolingSystem::reference().unwrap();
        let report = system.simulate_cooling_system(&environment()).unwrap();

        assert_relative_eq!(
            report.compression.outlet_temperature.get::<kelvin>(),
            401.25,
            epsilon = 0.01
        );
        assert_eq!(report.solar, system.engine().simulate(&environment()).unwrap());

        assert_eq!(report.vortex.len(), 16);
        let first = report.vortex[0];
        assert_eq!((first.viscosity_ratio, first.peclet_number), (0.35, 4.0));
        assert_relative_eq!(first.temperature_drop.get::<delta_kelvin>(), 13.433, epsilon = 0.01);
        assert_eq!((report.vortex[1].viscosity_ratio, report.vortex[1].peclet_number), (0.35, 5.0));

        let last = report.vortex[15];
        assert_eq!((last.viscosity_ratio, last.peclet_number), (0.65, 7.0));
        assert_relative_eq!(last.temperature_drop.get::<delta_kelvin>(), 10.4, epsilon = 0.01);

        for point in &report.vortex {
            assert_relative_eq!(
                point.cold_outlet_temperature.get::<kelvin>(),
                293.15 - point.temperature_drop.get::<delta_kelvin>(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn compressor_inlet_is_independent_of_ambient() {
        let system = SolarCoolingSystem::reference().unwrap();
        let report = system
            .report(&environment(), temp(298.0), &[0.37], &[6.92])
            .unwrap();

        let compression = report.compression;
        assert_eq!(compression.inlet_temperature, temp(298.0));
        assert_relative_eq!(compression.outlet_temperature.get::<kelvin>(), 407.88, epsilon = 0.01);
        assert_relative_eq!(
            compression.specific_work.get::<kilojoule_per_kilogram>(),
            110.32,
            epsilon = 0.01
        );

        let point = report.vortex[0];
        assert_relative_eq!(
            point.cold_outlet_temperature.get::<kelvin>(),
            293.15 - point.temperature_drop.get::<delta_kelvin>(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn rejects_invalid_grid() {
        let system = SolarCoolingSystem::reference().unwrap();
        let err = system
            .report(&environment(), temp(293.15), &[0.4, -0.1], &[5.0])
            .unwrap_err();

        assert!(matches!(err, CoolingError::OutOfDomain { .. }));
    }
}
