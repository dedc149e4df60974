use nalgebra::{DMatrix, DVector};
use tracing::debug;
use uom::si::temperature_interval::kelvin as delta_kelvin;

use crate::support::least_squares::{LeastSquaresProblem, LevenbergMarquardt};

use super::{Coefficients, FitError, VortexData};

/// Measurements whose magnitude never exceeds this, in K, carry no signal.
const NEGLIGIBLE_DROP: f64 = 1e-9;

/// Settings for the correlation fit.
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    pub solver: LevenbergMarquardt,
    pub initial_guess: Coefficients,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            solver: LevenbergMarquardt::default(),
            initial_guess: Coefficients::INITIAL_GUESS,
        }
    }
}

/// Outcome of a successful fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSummary {
    pub coefficients: Coefficients,
    /// Sum of squared normalized residuals.
    pub cost: f64,
    pub iters: usize,
}

struct CorrelationProblem<'a> {
    viscosity_ratios: &'a [f64],
    peclet_numbers: &'a [f64],
    targets: Vec<f64>,
}

impl LeastSquaresProblem for CorrelationProblem<'_> {
    fn residuals(&self, params: &DVector<f64>) -> DVector<f64> {
        let coefficients = Coefficients::from_vector(params);
        DVector::from_iterator(
            self.targets.len(),
            self.viscosity_ratios
                .iter()
                .zip(self.peclet_numbers)
                .zip(&self.targets)
                .map(|((&mu, &pe), &target)| coefficients.normalized_drop(mu, pe) - target),
        )
    }

    fn jacobian(&self, params: &DVector<f64>) -> DMatrix<f64> {
        let coefficients = Coefficients::from_vector(params);
        let mut jacobian = DMatrix::zeros(self.targets.len(), 6);
        for (row, (&mu, &pe)) in self
            .viscosity_ratios
            .iter()
            .zip(self.peclet_numbers)
            .enumerate()
        {
            for (col, value) in coefficients.gradient(mu, pe).into_iter().enumerate() {
                jacobian[(row, col)] = value;
            }
        }
        jacobian
    }
}

/// Fits the correlation to `data` by nonlinear least squares on `ΔT / T_ref`.
///
/// # Errors
///
/// Returns [`FitError::Degenerate`] if the data has fewer than two distinct
/// viscosity ratios or Peclet numbers, or every measurement is negligible,
/// and [`FitError::NoConvergence`] if the solver fails.
pub fn fit(data: &VortexData, config: &FitConfig) -> Result<FitSummary, FitError> {
    for (name, column) in [
        ("viscosity ratio", data.viscosity_ratios()),
        ("Peclet number", data.peclet_numbers()),
    ] {
        if !has_spread(column) {
            return Err(FitError::degenerate(format!(
                "all measurements share one {name}"
            )));
        }
    }
    if data
        .measurements()
        .all(|(_, _, dt)| dt.get::<delta_kelvin>().abs() <= NEGLIGIBLE_DROP)
    {
        return Err(FitError::degenerate("every temperature drop is negligible"));
    }

    let problem = CorrelationProblem {
        viscosity_ratios: data.viscosity_ratios(),
        peclet_numbers: data.peclet_numbers(),
        targets: data.normalized_drops(),
    };

    let solution = config
        .solver
        .solve(&problem, config.initial_guess.to_vector())?;

    let coefficients = Coefficients::from_vector(&solution.params);
    debug!(
        ?coefficients,
        cost = solution.cost,
        iters = solution.iters,
        termination = ?solution.termination,
        "fitted vortex tube correlation"
    );

    Ok(FitSummary {
        coefficients,
        cost: solution.cost,
        iters: solution.iters,
    })
}

fn has_spread(column: &[f64]) -> bool {
    column
        .split_first()
        .is_some_and(|(first, rest)| rest.iter().any(|x| x != first))
}
