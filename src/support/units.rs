//! Extensions to [`uom`].
//!
//! All physical quantities in this crate are [`uom`] quantities.
//! This module adds the few pieces the models need that [`uom`] lacks:
//!
//! - [`SpecificGasConstant`], the `R` in `p = ρ·R·T` and in the isothermal
//!   work of a Stirling working gas.
//! - [`TemperatureDifference`], for subtracting two absolute temperatures and
//!   getting a [`TemperatureInterval`] back.
//!
//! ```
//! use uom::si::{
//!     f64::ThermodynamicTemperature,
//!     temperature_interval::kelvin as delta_kelvin,
//!     thermodynamic_temperature::kelvin,
//! };
//! use solar_stirling_models::support::units::TemperatureDifference;
//!
//! let hot = ThermodynamicTemperature::new::<kelvin>(833.0);
//! let cold = ThermodynamicTemperature::new::<kelvin>(319.5);
//! assert_eq!(hot.minus(cold).get::<delta_kelvin>(), 513.5);
//! ```
//!
//! [`TemperatureInterval`]: uom::si::f64::TemperatureInterval

use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{TemperatureInterval, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin as abs_kelvin,
    },
    typenum::{N1, N2, P2, Z0},
};

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Extension trait for computing temperature differences.
///
/// [`uom`] does not subtract two [`ThermodynamicTemperature`] values into a
/// [`TemperatureInterval`], see
/// [#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

/// Shifts an absolute temperature by a signed interval.
#[must_use]
pub fn offset(
    temperature: ThermodynamicTemperature,
    interval: TemperatureInterval,
) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<abs_kelvin>(
        temperature.get::<abs_kelvin>() + interval.get::<delta_kelvin>(),
    )
}
