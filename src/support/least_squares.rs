//! Nonlinear least squares.
//!
//! A [`LeastSquaresProblem`] supplies residuals and their Jacobian for a
//! parameter vector. [`LevenbergMarquardt`] minimizes the sum of squared
//! residuals, blending Gauss-Newton steps with gradient descent through a
//! diagonal damping term scaled by `diag(JᵀJ)`.
//!
//! The diagonal damping keeps the step well defined when parameters are not
//! individually identifiable (collinear Jacobian columns): the fit converges
//! to one of the equivalent minimizers instead of failing.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Lower bound on the diagonal entries used to scale the damping term.
const DIAGONAL_FLOOR: f64 = 1e-12;

/// A least-squares problem over a parameter vector.
pub trait LeastSquaresProblem {
    /// Residuals (model minus observation) at `params`.
    fn residuals(&self, params: &DVector<f64>) -> DVector<f64>;

    /// Jacobian of the residuals with respect to `params`.
    ///
    /// Rows follow residuals and columns follow parameters.
    fn jacobian(&self, params: &DVector<f64>) -> DMatrix<f64>;
}

/// Why a fit stopped successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The gradient of the cost fell below tolerance.
    Gradient,
    /// The proposed step became negligible relative to the parameters.
    Step,
    /// An accepted step no longer reduced the cost meaningfully.
    Cost,
}

/// A converged least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    /// Fitted parameters.
    pub params: DVector<f64>,
    /// Sum of squared residuals at `params`.
    pub cost: f64,
    /// Outer iterations performed.
    pub iters: usize,
    /// Stopping criterion that fired.
    pub termination: Termination,
}

/// Ways a least-squares fit can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeastSquaresError {
    /// Residuals or gradient were not finite.
    #[error("non-finite residuals after {iters} iterations")]
    NonFinite { iters: usize },

    /// The damped normal equations could not be solved.
    #[error("singular normal equations after {iters} iterations")]
    Singular { iters: usize },

    /// Damping grew past its limit without finding a cost reduction.
    #[error("fit stalled: cost={cost}, iters={iters}")]
    Stalled { cost: f64, iters: usize },

    /// The iteration limit was reached.
    #[error("hit iteration limit: cost={cost}, iters={iters}")]
    MaxIters { cost: f64, iters: usize },
}

/// Levenberg–Marquardt solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct LevenbergMarquardt {
    /// Maximum outer iterations.
    pub max_iters: usize,
    /// Starting damping factor.
    pub initial_damping: f64,
    /// Damping never drops below this value.
    pub min_damping: f64,
    /// Damping above this value means the fit has stalled.
    pub max_damping: f64,
    /// Multiplier applied to damping on rejection and divided out on acceptance.
    pub damping_factor: f64,
    /// Relative tolerance on the step norm.
    pub x_tol: f64,
    /// Relative tolerance on the cost reduction of an accepted step.
    pub f_tol: f64,
    /// Absolute tolerance on the gradient's largest component.
    pub g_tol: f64,
}

impl Default for LevenbergMarquardt {
    fn default() -> Self {
        Self {
            max_iters: 200,
            initial_damping: 1e-3,
            min_damping: 1e-10,
            max_damping: 1e16,
            damping_factor: 10.0,
            x_tol: 1e-12,
            f_tol: 1e-14,
            g_tol: 1e-14,
        }
    }
}

impl LevenbergMarquardt {
    /// Minimizes the squared residuals of `problem` starting from `initial`.
    ///
    /// # Errors
    ///
    /// Returns a [`LeastSquaresError`] if the residuals become non-finite, the
    /// fit stalls, or the iteration limit is reached.
    pub fn solve<P: LeastSquaresProblem>(
        &self,
        problem: &P,
        initial: DVector<f64>,
    ) -> Result<Fit, LeastSquaresError> {
        let mut params = initial;
        let mut residuals = problem.residuals(&params);
        let mut cost = residuals.norm_squared();
        if !cost.is_finite() {
            return Err(LeastSquaresError::NonFinite { iters: 0 });
        }

        let mut damping = self.initial_damping;

        for iter in 0..self.max_iters {
            let jacobian = problem.jacobian(&params);
            let jtj = jacobian.transpose() * &jacobian;
            let gradient = jacobian.transpose() * &residuals;

            if gradient.iter().any(|g| !g.is_finite()) {
                return Err(LeastSquaresError::NonFinite { iters: iter });
            }
            if gradient.amax() <= self.g_tol {
                return Ok(Fit {
                    params,
                    cost,
                    iters: iter,
                    termination: Termination::Gradient,
                });
            }

            loop {
                let mut lhs = jtj.clone();
                for i in 0..lhs.nrows() {
                    lhs[(i, i)] += damping * jtj[(i, i)].max(DIAGONAL_FLOOR);
                }

                let Some(step) = lhs.lu().solve(&(-&gradient)) else {
                    damping *= self.damping_factor;
                    if damping > self.max_damping {
                        return Err(LeastSquaresError::Singular { iters: iter });
                    }
                    continue;
                };

                if step.norm() <= self.x_tol * (params.norm() + self.x_tol) {
                    return Ok(Fit {
                        params,
                        cost,
                        iters: iter,
                        termination: Termination::Step,
                    });
                }

                let candidate = &params + &step;
                let candidate_residuals = problem.residuals(&candidate);
                let candidate_cost = candidate_residuals.norm_squared();

                if candidate_cost.is_finite() && candidate_cost <= cost {
                    let reduction = cost - candidate_cost;
                    let previous = cost;

                    params = candidate;
                    residuals = candidate_residuals;
                    cost = candidate_cost;
                    damping = (damping / self.damping_factor).max(self.min_damping);

                    if reduction <= self.f_tol * previous {
                        return Ok(Fit {
                            params,
                            cost,
                            iters: iter + 1,
                            termination: Termination::Cost,
                        });
                    }
                    break;
                }

                damping *= self.damping_factor;
                if damping > self.max_damping {
                    return Err(LeastSquaresError::Stalled { cost, iters: iter });
                }
            }
        }

        Err(LeastSquaresError::MaxIters {
            cost,
            iters: self.max_iters,
        })
    }
}
