use uom::si::{
    f64::{HeatFluxDensity, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::constraint::{NonNegative, StrictlyPositive, require};

use super::SimulationError;

/// Swinbank clear-sky correlation, `T_sky = 0.0552 · T_amb^1.5` in kelvin.
const SKY_COEFFICIENT: f64 = 0.0552;
const SKY_EXPONENT: f64 = 1.5;

/// McAdams wind correlation, `h_c = 5.7 + 3.8 · V` in W/m²·K.
const CONVECTION_STILL_AIR: f64 = 5.7;
const CONVECTION_PER_WIND_SPEED: f64 = 3.8;

/// Environmental forcing for one simulation point.
///
/// Irradiance and wind speed must be finite and non-negative, and the ambient
/// temperature must be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    irradiance: HeatFluxDensity,
    wind_speed: Velocity,
    ambient: ThermodynamicTemperature,
}

impl Environment {
    /// Creates a validated environment.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::OutOfDomain`] if any value is non-finite,
    /// the irradiance or wind speed is negative, or the ambient temperature is
    /// not strictly positive.
    pub fn new(
        irradiance: HeatFluxDensity,
        wind_speed: Velocity,
        ambient: ThermodynamicTemperature,
    ) -> Result<Self, SimulationError> {
        require::<NonNegative>("irradiance", irradiance.get::<watt_per_square_meter>())?;
        require::<NonNegative>("wind speed", wind_speed.get::<meter_per_second>())?;
        require::<StrictlyPositive>("ambient temperature", ambient.get::<kelvin>())?;

        Ok(Self {
            irradiance,
            wind_speed,
            ambient,
        })
    }

    #[must_use]
    pub fn irradiance(&self) -> HeatFluxDensity {
        self.irradiance
    }

    #[must_use]
    pub fn wind_speed(&self) -> Velocity {
        self.wind_speed
    }

    #[must_use]
    pub fn ambient_temperature(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    /// Effective sky temperature for radiative exchange.
    #[must_use]
    pub fn sky_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(
            SKY_COEFFICIENT * self.ambient.get::<kelvin>().powf(SKY_EXPONENT),
        )
    }

    /// Forced-convection coefficient over the receiver, in W/m²·K.
    #[must_use]
    pub fn convection_coefficient(&self) -> f64 {
        CONVECTION_STILL_AIR + CONVECTION_PER_WIND_SPEED * self.wind_speed.get::<meter_per_second>()
    }
}
