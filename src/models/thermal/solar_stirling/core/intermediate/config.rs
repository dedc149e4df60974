use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, TemperatureInterval, ThermodynamicTemperature},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Solver configuration for the intermediate temperature bisection.
///
/// The bracket is `(load outlet + lower_offset, upper_bound)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the load-side imbalance.
    pub residual_tol: Power,

    /// Offset of the lower bracket above the load outlet temperature.
    pub lower_offset: TemperatureInterval,

    /// Upper bracket.
    pub upper_bound: ThermodynamicTemperature,
}

impl Default for IntermediateConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: Power::new::<watt>(0.1),
            lower_offset: TemperatureInterval::new::<delta_kelvin>(1.0),
            upper_bound: ThermodynamicTemperature::new::<kelvin>(900.0),
        }
    }
}

impl IntermediateConfig {
    /// Converts this configuration into a bisection solver configuration.
    ///
    /// Only the residual tolerance stops the search early.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: 0.0,
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol.get::<watt>(),
        }
    }
}
