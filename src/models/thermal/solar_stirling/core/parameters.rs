use uom::si::{
    area::square_meter,
    f64::{
        Area, Frequency, Mass, MassRate, SpecificHeatCapacity, TemperatureInterval,
        ThermalConductance, Volume,
    },
    frequency::hertz,
    mass::kilogram,
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
    volume::liter,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive, UnitInterval, require},
    units::SpecificGasConstant,
};

use super::SimulationError;

/// Swept volumes at the four corners of the ideal Stirling cycle.
///
/// Only the ratios `v1 / v2` (load-side isothermal compression) and
/// `v4 / v3` (hot-side isothermal expansion) enter the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleVolumes {
    pub v1: Volume,
    pub v2: Volume,
    pub v3: Volume,
    pub v4: Volume,
}

impl CycleVolumes {
    /// Returns `ln(v1 / v2)`.
    #[must_use]
    pub fn load_side_log_ratio(&self) -> f64 {
        (self.v1 / self.v2).get::<ratio>().ln()
    }

    /// Returns `ln(v4 / v3)`.
    #[must_use]
    pub fn hot_side_log_ratio(&self) -> f64 {
        (self.v4 / self.v3).get::<ratio>().ln()
    }
}

/// Immutable constant table for the collector, engine and load loop.
///
/// Every calculation receives this table explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StirlingParameters {
    /// Receiver aperture area `A_R`.
    pub receiver_area: Area,
    /// Geometric concentration ratio `C` of the collector.
    pub concentration_ratio: f64,
    /// Optical efficiency `η_optical` of the collector.
    pub optical_efficiency: f64,
    /// Receiver emissivity `ε`.
    pub emissivity: f64,
    /// Hot-side heat exchanger conductance `K_H`.
    pub hot_side_conductance: ThermalConductance,
    /// Load-side heat exchanger conductance `K_L`.
    pub load_side_conductance: ThermalConductance,
    /// Working gas mass `m`.
    pub gas_mass: Mass,
    /// Working gas constant-volume specific heat `c_v`.
    pub gas_cv: SpecificHeatCapacity,
    /// Working gas specific gas constant `R_g`.
    pub gas_constant: SpecificGasConstant,
    /// Regenerator effectiveness `ε_r`.
    pub regenerator_effectiveness: f64,
    /// Cycle frequency `F`.
    pub cycle_frequency: Frequency,
    /// Cycle volumes.
    pub volumes: CycleVolumes,
    /// Load-side water mass flow rate.
    pub water_mass_rate: MassRate,
    /// Load-side water specific heat.
    pub water_cp: SpecificHeatCapacity,
    /// Initial estimate of the load outlet rise over its inlet.
    pub load_outlet_rise: TemperatureInterval,
}

impl StirlingParameters {
    /// Returns the reference parameter set: a 0.0491 m² receiver under a
    /// 1250× dish, driving a helium engine at 25 Hz.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            receiver_area: Area::new::<square_meter>(0.0491),
            concentration_ratio: 1250.0,
            optical_efficiency: 0.8,
            emissivity: 0.8,
            hot_side_conductance: ThermalConductance::new::<watt_per_kelvin>(300.0),
            load_side_conductance: ThermalConductance::new::<watt_per_kelvin>(500.0),
            gas_mass: Mass::new::<kilogram>(8e-4),
            gas_cv: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(3116.0),
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(2077.0),
            regenerator_effectiveness: 0.8,
            cycle_frequency: Frequency::new::<hertz>(25.0),
            volumes: CycleVolumes {
                v1: Volume::new::<liter>(1.3),
                v2: Volume::new::<liter>(0.6),
                v3: Volume::new::<liter>(0.6),
                v4: Volume::new::<liter>(1.3),
            },
            water_mass_rate: MassRate::new::<kilogram_per_second>(0.4),
            water_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4180.0),
            load_outlet_rise: TemperatureInterval::new::<delta_kelvin>(10.0),
        }
    }

    /// Checks that every constant is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::OutOfDomain`] naming the first invalid constant.
    pub fn validate(&self) -> Result<(), SimulationError> {
        require::<StrictlyPositive>("receiver area", self.receiver_area.get::<square_meter>())?;
        require::<StrictlyPositive>("concentration ratio", self.concentration_ratio)?;
        require::<UnitInterval>("optical efficiency", self.optical_efficiency)?;
        require::<UnitInterval>("emissivity", self.emissivity)?;
        require::<StrictlyPositive>(
            "hot side conductance",
            self.hot_side_conductance.get::<watt_per_kelvin>(),
        )?;
        require::<StrictlyPositive>(
            "load side conductance",
            self.load_side_conductance.get::<watt_per_kelvin>(),
        )?;
        require::<StrictlyPositive>("gas mass", self.gas_mass.get::<kilogram>())?;
        require::<StrictlyPositive>("gas cv", self.gas_cv.get::<joule_per_kilogram_kelvin>())?;
        require::<StrictlyPositive>(
            "gas constant",
            self.gas_constant.get::<joule_per_kilogram_kelvin>(),
        )?;
        require::<UnitInterval>("regenerator effectiveness", self.regenerator_effectiveness)?;
        require::<StrictlyPositive>("cycle frequency", self.cycle_frequency.get::<hertz>())?;
        for (name, volume) in [
            ("v1", self.volumes.v1),
            ("v2", self.volumes.v2),
            ("v3", self.volumes.v3),
            ("v4", self.volumes.v4),
        ] {
            require::<StrictlyPositive>(name, volume.get::<liter>())?;
        }
        require::<StrictlyPositive>(
            "water mass rate",
            self.water_mass_rate.get::<kilogram_per_second>(),
        )?;
        require::<StrictlyPositive>("water cp", self.water_cp.get::<joule_per_kilogram_kelvin>())?;
        require::<NonNegative>(
            "load outlet rise",
            self.load_outlet_rise.get::<delta_kelvin>(),
        )?;
        Ok(())
    }
}

impl Default for StirlingParameters {
    fn default() -> Self {
        Self::reference()
    }
}
