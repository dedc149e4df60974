//! Receiver energy balance on the hot side.

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{Energy, Power, TemperatureInterval, ThermodynamicTemperature},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    root_finding::RootFinder,
    units::{TemperatureDifference, offset},
};

use super::{Environment, SimulationError, StirlingParameters};

/// Stefan–Boltzmann constant, W/m²·K⁴.
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Hot-side heat rates at a given pair of temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotSideRates {
    /// Net heat the receiver delivers after convection and radiation losses.
    pub supplement: Power,
    /// Heat the cycle absorbs at `T_h`.
    pub load: Power,
    /// Heat the hot-side exchanger passes from `T_h` to `T_I`.
    pub transfer: Power,
}

/// Net heat delivered by the receiver at hot-side temperature `hot_side`.
///
/// Concentrated irradiance minus wind convection and radiation to the sky.
#[must_use]
pub fn heat_supplement(
    parameters: &StirlingParameters,
    environment: &Environment,
    hot_side: ThermodynamicTemperature,
) -> Power {
    let area = parameters.receiver_area.get::<square_meter>();
    let t_h = hot_side.get::<kelvin>();
    let t_sky = environment.sky_temperature().get::<kelvin>();

    let absorbed: Power = environment.irradiance()
        * parameters.receiver_area
        * parameters.concentration_ratio
        * parameters.optical_efficiency;
    let convection = environment.convection_coefficient()
        * area
        * hot_side
            .minus(environment.ambient_temperature())
            .get::<delta_kelvin>();
    let radiation =
        parameters.emissivity * STEFAN_BOLTZMANN * area * (t_h.powi(4) - t_sky.powi(4));

    absorbed - Power::new::<watt>(convection + radiation)
}

/// Heat absorbed per unit time by isothermal expansion plus regenerator loss.
#[must_use]
pub fn heat_load(
    parameters: &StirlingParameters,
    intermediate: ThermodynamicTemperature,
    hot_side: ThermodynamicTemperature,
) -> Power {
    let regenerator: Energy = parameters.gas_mass
        * parameters.gas_cv
        * hot_side.minus(intermediate)
        * (1.0 - parameters.regenerator_effectiveness);
    let isothermal: Energy = parameters.gas_mass
        * parameters.gas_constant
        * hot_side
        * parameters.volumes.hot_side_log_ratio();

    parameters.cycle_frequency * (regenerator + isothermal)
}

#[must_use]
pub fn heat_transfer(
    parameters: &StirlingParameters,
    intermediate: ThermodynamicTemperature,
    hot_side: ThermodynamicTemperature,
) -> Power {
    parameters.hot_side_conductance * hot_side.minus(intermediate)
}

#[must_use]
pub fn hot_side_rates(
    parameters: &StirlingParameters,
    environment: &Environment,
    intermediate: ThermodynamicTemperature,
    hot_side: ThermodynamicTemperature,
) -> HotSideRates {
    HotSideRates {
        supplement: heat_supplement(parameters, environment, hot_side),
        load: heat_load(parameters, intermediate, hot_side),
        transfer: heat_transfer(parameters, intermediate, hot_side),
    }
}

/// Solves the receiver balance `supplement(T_h) = load(T_I, T_h)` for `T_h`.
///
/// The search starts 1 K above `intermediate`.
///
/// # Errors
///
/// Returns [`SimulationError::HotSideConvergence`] if the root finder fails,
/// and [`SimulationError::SecondLawViolation`] if the root it finds is not
/// hotter than `intermediate`.
pub fn solve_hot_side_temperature(
    parameters: &StirlingParameters,
    environment: &Environment,
    intermediate: ThermodynamicTemperature,
    root_finder: &impl RootFinder,
) -> Result<ThermodynamicTemperature, SimulationError> {
    let seed = offset(intermediate, TemperatureInterval::new::<delta_kelvin>(1.0));

    let balance = |t_h: f64| {
        let hot_side = ThermodynamicTemperature::new::<kelvin>(t_h);
        (heat_supplement(parameters, environment, hot_side)
            - heat_load(parameters, intermediate, hot_side))
        .get::<watt>()
    };

    let root = root_finder
        .find_root(balance, seed.get::<kelvin>())
        .map_err(|source| SimulationError::HotSideConvergence { seed, source })?;

    let hot_side = ThermodynamicTemperature::new::<kelvin>(root.x);
    if hot_side <= intermediate {
        return Err(SimulationError::SecondLawViolation {
            intermediate,
            hot_side,
        });
    }

    debug!(
        t_h_k = root.x,
        iters = root.iters,
        "solved hot side temperature"
    );

    Ok(hot_side)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{HeatFluxDensity, Velocity},
        heat_flux_density::watt_per_square_meter,
        velocity::meter_per_second,
    };

    use crate::support::root_finding::{Newton, Root, RootFindingError};

    fn temp(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    fn environment(irradiance: f64) -> Environment {
        Environment::new(
            HeatFluxDensity::new::<watt_per_square_meter>(irradiance),
            Velocity::new::<meter_per_second>(0.0),
            temp(293.15),
        )
        .unwrap()
    }

    struct Refuses;

    impl RootFinder for Refuses {
        fn find_root<F>(&self, _residual: F, seed: f64) -> Result<Root, RootFindingError>
        where
            F: Fn(f64) -> f64,
        {
            Err(RootFindingError::MaxIters {
                x: seed,
                residual: f64::NAN,
                iters: 0,
            })
        }
    }

    #[test]
    fn supplement_matches_closed_form() {
        let params = StirlingParameters::reference();
        let env = environment(700.0);

        let t_sky = 0.0552 * 293.15_f64.powf(1.5);
        let expected = 700.0 * 0.0491 * 1250.0 * 0.8
            - 5.7 * 0.0491 * (800.0 - 293.15)
            - 0.8 * 5.67e-8 * 0.0491 * (800.0_f64.powi(4) - t_sky.powi(4));

        let supplement = heat_supplement(&params, &env, temp(800.0));
        assert_relative_eq!(supplement.get::<watt>(), expected, max_relative = 1e-12);
    }

    #[test]
    fn load_and_transfer_match_closed_form() {
        let params = StirlingParameters::reference();
        let rates = hot_side_rates(&params, &environment(700.0), temp(350.0), temp(800.0));

        let expected_load = 25.0
            * (8e-4 * 3116.0 * 450.0 * 0.2 + 8e-4 * 2077.0 * 800.0 * (1.3_f64 / 0.6).ln());
        assert_relative_eq!(rates.load.get::<watt>(), expected_load, max_relative = 1e-12);
        assert_relative_eq!(rates.transfer.get::<watt>(), 300.0 * 450.0, max_relative = 1e-12);
    }

    #[test]
    fn solved_root_balances_receiver() {
        let params = StirlingParameters::reference();
        let env = environment(700.0);
        let t_i = temp(320.0);

        let t_h = solve_hot_side_temperature(&params, &env, t_i, &Newton::default()).unwrap();

        assert!(t_h > t_i);
        let residual = heat_supplement(&params, &env, t_h) - heat_load(&params, t_i, t_h);
        assert!(residual.get::<watt>().abs() < 1e-4);
    }

    #[test]
    fn root_finder_failure_is_surfaced() {
        let params = StirlingParameters::reference();
        let err = solve_hot_side_temperature(&params, &environment(700.0), temp(320.0), &Refuses)
            .unwrap_err();

        match err {
            SimulationError::HotSideConvergence { seed, source } => {
                assert_relative_eq!(seed.get::<kelvin>(), 321.0, epsilon = 1e-12);
                assert!(matches!(source, RootFindingError::MaxIters { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_sun_violates_second_law() {
        let params = StirlingParameters::reference();
        let err = solve_hot_side_temperature(&params, &environment(0.0), temp(320.0), &Newton::default())
            .unwrap_err();

        assert!(matches!(err, SimulationError::SecondLawViolation { .. }));
    }
}
