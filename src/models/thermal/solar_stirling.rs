//! Solar dish Stirling engine at thermal equilibrium.
//!
//! A parabolic dish concentrates sunlight onto a receiver that heats the
//! engine's hot side at `T_h`. The engine rejects heat at an intermediate
//! temperature `T_I` to a water loop entering at ambient temperature.
//! Two energy balances fix the pair:
//!
//! 1. Load side: the heat the cycle rejects at `T_I` equals what the
//!    load-side exchanger passes to the water. Solved by bisection.
//! 2. Hot side: the net receiver heat equals what the cycle absorbs at `T_h`.
//!    Solved by a seeded [`RootFinder`].
//!
//! Power then follows from the ideal cycle between `T_h` and `T_I`.
//!
//! ```
//! use solar_stirling_models::models::thermal::solar_stirling::{Environment, SolarStirling};
//! use uom::si::{
//!     f64::{HeatFluxDensity, ThermodynamicTemperature, Velocity},
//!     heat_flux_density::watt_per_square_meter,
//!     power::kilowatt,
//!     thermodynamic_temperature::kelvin,
//!     velocity::meter_per_second,
//! };
//!
//! let engine = SolarStirling::reference();
//! let environment = Environment::new(
//!     HeatFluxDensity::new::<watt_per_square_meter>(700.0),
//!     Velocity::new::<meter_per_second>(0.0),
//!     ThermodynamicTemperature::new::<kelvin>(293.15),
//! )
//! .unwrap();
//!
//! let result = engine.simulate(&environment).unwrap();
//! assert!((10.0..=25.0).contains(&result.power.get::<kilowatt>()));
//! ```

mod core;

pub use self::core::{
    Convergence, CycleVolumes, Environment, HotSideRates, IntermediateConfig,
    IntermediateSolution, LoadSideRates, LoadTemperatures, STEFAN_BOLTZMANN, SimulationConfig,
    SimulationError, SimulationResult, StirlingParameters, heat_load, heat_supplement,
    heat_transfer, hot_side_rates, load_heat_rate, load_side_rates, power_output, refined_outlet,
    solve_hot_side_temperature, solve_intermediate_temperature,
};

use twine_core::Model;
use uom::si::f64::{Power, ThermodynamicTemperature};

use crate::support::root_finding::RootFinder;

/// Solar Stirling engine with a validated parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarStirling {
    parameters: StirlingParameters,
    config: SimulationConfig,
}

impl SolarStirling {
    /// Creates an engine after validating `parameters`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::OutOfDomain`] if any constant is invalid.
    pub fn new(parameters: StirlingParameters) -> Result<Self, SimulationError> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            config: SimulationConfig::default(),
        })
    }

    /// Engine built on [`StirlingParameters::reference`].
    #[must_use]
    pub fn reference() -> Self {
        Self {
            parameters: StirlingParameters::reference(),
            config: SimulationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(self, config: SimulationConfig) -> Self {
        Self { config, ..self }
    }

    #[must_use]
    pub fn parameters(&self) -> &StirlingParameters {
        &self.parameters
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Solves the equilibrium for one environment.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if either balance cannot be solved.
    pub fn simulate(&self, environment: &Environment) -> Result<SimulationResult, SimulationError> {
        self.simulate_with(environment, &self.config.hot_side)
    }

    /// Solves the equilibrium using a caller-supplied hot-side root finder.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if either balance cannot be solved.
    pub fn simulate_with(
        &self,
        environment: &Environment,
        root_finder: &impl RootFinder,
    ) -> Result<SimulationResult, SimulationError> {
        core::run_simulation(
            &self.parameters,
            environment,
            &self.config.intermediate,
            root_finder,
        )
    }

    /// Solves the load-side balance for the intermediate temperature.
    ///
    /// # Errors
    ///
    /// See [`solve_intermediate_temperature`].
    pub fn intermediate_temperature(
        &self,
        load: LoadTemperatures,
    ) -> Result<IntermediateSolution, SimulationError> {
        solve_intermediate_temperature(&self.parameters, load, &self.config.intermediate)
    }

    /// Solves the receiver balance for the hot-side temperature.
    ///
    /// # Errors
    ///
    /// See [`solve_hot_side_temperature`].
    pub fn hot_side_temperature(
        &self,
        environment: &Environment,
        intermediate: ThermodynamicTemperature,
    ) -> Result<ThermodynamicTemperature, SimulationError> {
        solve_hot_side_temperature(
            &self.parameters,
            environment,
            intermediate,
            &self.config.hot_side,
        )
    }

    #[must_use]
    pub fn power_output(
        &self,
        hot_side: ThermodynamicTemperature,
        cold_side: ThermodynamicTemperature,
    ) -> Power {
        power_output(&self.parameters, hot_side, cold_side)
    }
}

impl Default for SolarStirling {
    fn default() -> Self {
        Self::reference()
    }
}

impl Model for SolarStirling {
    type Input = Environment;
    type Output = SimulationResult;
    type Error = SimulationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.simulate(input)
    }
}
