//! Intermediate temperature search on the load side.
//!
//! Finds `T_I` where the heat the cycle rejects equals the heat the load-side
//! exchanger can pass to the water, by bisection over
//! `(T_L,out + 1 K, 900 K)`.

mod config;
mod problem;

pub use config::IntermediateConfig;

use tracing::{debug, warn};
use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{
        f64::{Power, ThermodynamicTemperature},
        power::watt,
        thermodynamic_temperature::kelvin,
    },
};

use crate::support::{
    constraint::{StrictlyPositive, require},
    units::offset,
};

use super::{
    SimulationError, StirlingParameters,
    load_side::{LoadSideRates, LoadTemperatures},
};

use problem::{LoadSideBalance, LoadSideModel};

/// How the intermediate temperature search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The imbalance fell within tolerance.
    Converged,
    /// The imbalance never fell within tolerance.
    ///
    /// Either the iteration cap was reached and the iterate with the smallest
    /// imbalance was kept, or the imbalance has one sign across the whole
    /// bracket and the end the search drifts to was kept.
    IterationLimit,
}

/// Result of the intermediate temperature search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateSolution {
    /// Intermediate temperature `T_I`.
    pub temperature: ThermodynamicTemperature,
    /// Load-side rates at `temperature`.
    pub rates: LoadSideRates,
    pub convergence: Convergence,
    pub iters: usize,
    /// Imbalance `supplement - transfer` reported by the solver.
    pub residual: Power,
}

/// Solves for the intermediate temperature `T_I`.
///
/// Candidates at or below the water inlet make the log-mean temperature
/// difference undefined; they are treated as a positive imbalance so the
/// bracket moves toward hotter candidates.
///
/// Hitting the iteration cap is not an error: the iterate with the smallest
/// imbalance is returned with [`Convergence::IterationLimit`]. Neither is a
/// bracket over which the imbalance keeps one sign. Halving would then walk to
/// one end, so that end is returned. A positive imbalance (the cycle rejects
/// more than the exchanger passes) walks to the upper end, a negative one to
/// the lower end.
///
/// # Errors
///
/// Returns [`SimulationError::OutOfDomain`] if a load temperature is not a
/// finite positive value or the bracket is empty, and
/// [`SimulationError::Bisection`] if the solver itself fails.
pub fn solve_intermediate_temperature(
    parameters: &StirlingParameters,
    load: LoadTemperatures,
    config: &IntermediateConfig,
) -> Result<IntermediateSolution, SimulationError> {
    require::<StrictlyPositive>("load inlet temperature", load.inlet.get::<kelvin>())?;
    require::<StrictlyPositive>("load outlet temperature", load.outlet.get::<kelvin>())?;

    let lower = offset(load.outlet, config.lower_offset).get::<kelvin>();
    let upper = config.upper_bound.get::<kelvin>();
    if lower >= upper {
        return Err(SimulationError::out_of_domain(format!(
            "empty intermediate temperature bracket [{lower}, {upper}] K"
        )));
    }

    let model = LoadSideModel::new(parameters, load);

    let solved = bisection::solve(
        &model,
        &LoadSideBalance,
        [lower, upper],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Candidate is not above the water inlet, so the cycle can only
            // reject more heat than the exchanger passes.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    );

    let solution = match solved {
        Ok(solution) => solution,
        Err(bisection::Error::InvalidBracket(bisection::BracketError::NoSignChange)) => {
            return bracket_end(&model, [lower, upper], config);
        }
        Err(err) => {
            return Err(SimulationError::Bisection {
                context: err.to_string(),
            });
        }
    };

    let convergence = if solution.status == bisection::Status::Converged {
        Convergence::Converged
    } else {
        warn!(
            iters = solution.iters,
            residual_w = solution.residual,
            "intermediate temperature search hit its iteration cap"
        );
        Convergence::IterationLimit
    };

    let iters = solution.iters;
    let residual = Power::new::<watt>(solution.residual);
    let rates = solution.snapshot.output;

    debug!(
        t_i_k = rates.intermediate.get::<kelvin>(),
        iters, "solved intermediate temperature"
    );

    Ok(IntermediateSolution {
        temperature: rates.intermediate,
        rates,
        convergence,
        iters,
        residual,
    })
}

/// Picks the bracket end for an imbalance that keeps one sign.
fn bracket_end(
    model: &LoadSideModel<'_>,
    [lower, upper]: [f64; 2],
    config: &IntermediateConfig,
) -> Result<IntermediateSolution, SimulationError> {
    let evaluate = |x: f64| {
        model
            .call(&ThermodynamicTemperature::new::<kelvin>(x))
            .map_err(|err| SimulationError::Bisection {
                context: format!("bracket end {x} K: {err}"),
            })
    };

    let upper_rates = evaluate(upper)?;
    let rates = if upper_rates.imbalance() >= Power::ZERO {
        upper_rates
    } else {
        evaluate(lower)?
    };

    let residual = rates.imbalance();
    let (convergence, iters) = if residual.abs() <= config.residual_tol {
        (Convergence::Converged, 0)
    } else {
        warn!(
            t_i_k = rates.intermediate.get::<kelvin>(),
            residual_w = residual.get::<watt>(),
            "load-side imbalance keeps one sign over the bracket"
        );
        (Convergence::IterationLimit, config.max_iters)
    };

    Ok(IntermediateSolution {
        temperature: rates.intermediate,
        rates,
        convergence,
        iters,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::thermal::solar_stirling::core::load_side::load_side_rates;

    fn temp(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    fn reference_load() -> LoadTemperatures {
        LoadTemperatures {
            inlet: temp(293.15),
            outlet: temp(303.15),
        }
    }

    #[test]
    fn converges_within_tolerance() {
        let params = StirlingParameters::reference();
        let config = IntermediateConfig::default();

        let solution =
            solve_intermediate_temperature(&params, reference_load(), &config).unwrap();

        assert_eq!(solution.convergence, Convergence::Converged);
        assert!(solution.iters <= 100);

        let t_i = solution.temperature.get::<kelvin>();
        assert!(t_i > 304.15 && t_i < 900.0, "T_I = {t_i}");

        let rates = load_side_rates(&params, solution.temperature, reference_load()).unwrap();
        let imbalance = rates.imbalance().get::<watt>();
        assert!(imbalance.abs() < 0.1, "imbalance = {imbalance}");
        assert_relative_eq!(
            solution.rates.imbalance().get::<watt>(),
            imbalance,
            epsilon = 1e-9
        );
    }

    #[test]
    fn iteration_cap_returns_best_iterate() {
        let params = StirlingParameters::reference();
        let config = IntermediateConfig {
            max_iters: 5,
            ..IntermediateConfig::default()
        };

        let solution =
            solve_intermediate_temperature(&params, reference_load(), &config).unwrap();

        assert_eq!(solution.convergence, Convergence::IterationLimit);
        let t_i = solution.temperature.get::<kelvin>();
        assert!(t_i.is_finite());
        assert!(t_i > 304.15 && t_i < 900.0);

        // The kept iterate has the smallest imbalance seen, ends included.
        let residual = solution.residual.get::<watt>().abs();
        assert!(residual >= 0.1);
        assert_relative_eq!(
            residual,
            solution.rates.imbalance().get::<watt>().abs(),
            epsilon = 1e-9
        );
        for end in [304.15, 900.0] {
            let rates = load_side_rates(&params, temp(end), reference_load()).unwrap();
            assert!(residual <= rates.imbalance().get::<watt>().abs());
        }
    }

    #[test]
    fn hot_outlet_settles_on_lower_end() {
        let params = StirlingParameters::reference();
        let load = LoadTemperatures {
            inlet: temp(293.15),
            outlet: temp(800.0),
        };

        let solution =
            solve_intermediate_temperature(&params, load, &IntermediateConfig::default()).unwrap();

        assert_eq!(solution.convergence, Convergence::IterationLimit);
        assert_eq!(solution.iters, 100);
        assert_relative_eq!(solution.temperature.get::<kelvin>(), 801.0, epsilon = 1e-9);
        assert!(solution.residual < Power::ZERO);
        assert_eq!(solution.residual, solution.rates.imbalance());
    }

    #[test]
    fn hot_inlet_settles_on_upper_end() {
        let params = StirlingParameters::reference();
        let load = LoadTemperatures {
            inlet: temp(850.0),
            outlet: temp(860.0),
        };

        let solution =
            solve_intermediate_temperature(&params, load, &IntermediateConfig::default()).unwrap();

        assert_eq!(solution.convergence, Convergence::IterationLimit);
        assert_relative_eq!(solution.temperature.get::<kelvin>(), 900.0, epsilon = 1e-9);
        assert!(solution.residual > Power::ZERO);
    }

    #[test]
    fn outlet_close_to_inlet_stays_finite() {
        let params = StirlingParameters::reference();
        let load = LoadTemperatures {
            inlet: temp(293.15),
            outlet: temp(293.15 + 1e-9),
        };

        let solution =
            solve_intermediate_temperature(&params, load, &IntermediateConfig::default()).unwrap();

        assert!(solution.temperature.get::<kelvin>().is_finite());
        assert!(solution.rates.transfer.get::<watt>().is_finite());
        assert!(solution.rates.supplement.get::<watt>().is_finite());
    }

    #[test]
    fn candidates_below_inlet_are_steered_away() {
        let params = StirlingParameters::reference();
        let load = LoadTemperatures {
            inlet: temp(300.0),
            outlet: temp(290.0),
        };

        let solution =
            solve_intermediate_temperature(&params, load, &IntermediateConfig::default()).unwrap();

        let t_i = solution.temperature.get::<kelvin>();
        assert!(t_i > 300.0 && t_i < 900.0, "T_I = {t_i}");
        assert_eq!(solution.convergence, Convergence::Converged);
    }

    #[test]
    fn rejects_empty_bracket_and_bad_temperatures() {
        let params = StirlingParameters::reference();
        let config = IntermediateConfig::default();

        let hot_load = LoadTemperatures {
            inlet: temp(890.0),
            outlet: temp(899.5),
        };
        assert!(matches!(
            solve_intermediate_temperature(&params, hot_load, &config),
            Err(SimulationError::OutOfDomain { .. })
        ));

        let frozen = LoadTemperatures {
            inlet: temp(0.0),
            outlet: temp(10.0),
        };
        assert!(matches!(
            solve_intermediate_temperature(&params, frozen, &config),
            Err(SimulationError::OutOfDomain { .. })
        ));
    }
}
