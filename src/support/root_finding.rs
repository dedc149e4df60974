//! Scalar root finding from a single seed.
//!
//! Bracketed problems in this crate go through
//! [`twine_solvers::equation::bisection`]. Problems that only come with a
//! starting guess, such as the receiver energy balance, go through a
//! [`RootFinder`] so the numerical method can be swapped.

use thiserror::Error;

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Location of the root.
    pub x: f64,
    /// Residual evaluated at `x`.
    pub residual: f64,
    /// Iterations performed.
    pub iters: usize,
}

/// Ways a seeded root search can fail.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RootFindingError {
    /// The residual was not finite at an iterate.
    #[error("residual is not finite at x={x}")]
    NonFinite { x: f64 },

    /// The local slope vanished, so no step could be computed.
    #[error("zero slope at x={x}")]
    ZeroSlope { x: f64 },

    /// Backtracking could not reduce the residual.
    #[error("line search stagnated at x={x}, residual={residual}")]
    Stagnated { x: f64, residual: f64 },

    /// The iteration limit was reached.
    #[error("hit iteration limit: x={x}, residual={residual}, iters={iters}")]
    MaxIters { x: f64, residual: f64, iters: usize },
}

/// A method for finding `x` such that `residual(x) = 0`, starting from a seed.
///
/// Implementations must report failure as an error rather than returning the
/// seed or a non-finite value.
pub trait RootFinder {
    /// Searches for a root of `residual` starting at `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`RootFindingError`] if the search does not converge.
    fn find_root<F>(&self, residual: F, seed: f64) -> Result<Root, RootFindingError>
    where
        F: Fn(f64) -> f64;
}

/// Newton iteration with a finite-difference slope and backtracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Newton {
    /// Maximum iterations.
    pub max_iters: usize,
    /// Absolute tolerance on the residual.
    pub residual_tol: f64,
    /// Absolute tolerance on the step size.
    pub step_tol: f64,
    /// Relative perturbation used for the forward-difference slope.
    pub slope_step: f64,
    /// Backtracking factor applied when a step does not reduce the residual.
    pub line_search_beta: f64,
    /// Maximum backtracking steps per iteration.
    pub max_line_search_iters: usize,
}

impl Default for Newton {
    fn default() -> Self {
        Self {
            max_iters: 50,
            residual_tol: 1e-6,
            step_tol: 1e-10,
            slope_step: 1e-7,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

impl RootFinder for Newton {
    fn find_root<F>(&self, residual: F, seed: f64) -> Result<Root, RootFindingError>
    where
        F: Fn(f64) -> f64,
    {
        let eval = |x: f64| {
            let r = residual(x);
            if r.is_finite() {
                Ok(r)
            } else {
                Err(RootFindingError::NonFinite { x })
            }
        };

        let mut x = seed;
        let mut r = eval(x)?;

        for iter in 0..self.max_iters {
            if r.abs() <= self.residual_tol {
                return Ok(Root {
                    x,
                    residual: r,
                    iters: iter,
                });
            }

            let h = self.slope_step * x.abs().max(1.0);
            let slope = (eval(x + h)? - r) / h;
            if slope == 0.0 || !slope.is_finite() {
                return Err(RootFindingError::ZeroSlope { x });
            }

            let dx = -r / slope;
            let mut alpha = 1.0;
            let mut x_new = x + dx;
            let mut r_new = residual(x_new);

            for _ in 0..self.max_line_search_iters {
                if r_new.is_finite() && r_new.abs() < r.abs() {
                    break;
                }
                alpha *= self.line_search_beta;
                x_new = x + alpha * dx;
                r_new = residual(x_new);
            }

            if !r_new.is_finite() {
                return Err(RootFindingError::NonFinite { x: x_new });
            }
            if r_new.abs() >= r.abs() {
                return Err(RootFindingError::Stagnated { x, residual: r });
            }

            let step = (x_new - x).abs();
            x = x_new;
            r = r_new;

            if step <= self.step_tol * x.abs().max(1.0) {
                return Ok(Root {
                    x,
                    residual: r,
                    iters: iter + 1,
                });
            }
        }

        if r.abs() <= self.residual_tol {
            return Ok(Root {
                x,
                residual: r,
                iters: self.max_iters,
            });
        }

        Err(RootFindingError::MaxIters {
            x,
            residual: r,
            iters: self.max_iters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn simple_quadratic() {
        let root = Newton::default()
            .find_root(|x| x * x - 4.0, 3.0)
            .expect("should converge");

        assert_relative_eq!(root.x, 2.0, epsilon = 1e-8);
        assert!(root.residual.abs() <= 1e-6);
    }

    #[test]
    fn quartic_energy_balance() {
        // Absorbed flux minus convective and radiative losses.
        let balance =
            |t: f64| 30_000.0 - 40.0 * (t - 300.0) - 2.2e-9 * (t.powi(4) - 280.0_f64.powi(4));
        let root = Newton::default()
            .find_root(balance, 301.0)
            .expect("should converge");

        assert!(balance(root.x).abs() <= 1e-4);
        assert!(root.x > 300.0);
    }

    #[test]
    fn reports_iteration_limit() {
        let newton = Newton {
            max_iters: 2,
            ..Newton::default()
        };
        let err = newton.find_root(|x| x.exp() - 1e6, 0.0).unwrap_err();
        assert!(matches!(err, RootFindingError::MaxIters { iters: 2, .. }));
    }

    #[test]
    fn reports_zero_slope() {
        let err = Newton::default().find_root(|_| 1.0, 5.0).unwrap_err();
        assert_eq!(err, RootFindingError::ZeroSlope { x: 5.0 });
    }

    #[test]
    fn reports_non_finite_seed() {
        let err = Newton::default().find_root(f64::ln, -1.0).unwrap_err();
        assert!(matches!(err, RootFindingError::NonFinite { .. }));
    }
}
