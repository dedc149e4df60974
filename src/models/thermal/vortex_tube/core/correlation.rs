//! Power-law correlation for the vortex-tube cold-end temperature drop.
//!
//! `ΔT / T_ref = c0 · μ^c1 · 4^c2 · 0.155^c3 · Pe^c4 · 10^c5`
//!
//! The bases 4, 0.155 and 10 are fixed design parameters of the tube, not
//! regressors. Their exponents only scale the prefactor, so `c0`, `c2`, `c3`
//! and `c5` are not individually determined by data; [`Coefficients::prefactor`]
//! is.

use nalgebra::DVector;

const DESIGN_BASE_2: f64 = 4.0;
const DESIGN_BASE_3: f64 = 0.155;
const DESIGN_BASE_5: f64 = 10.0;

/// Fitted correlation coefficients `c0..c5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients(pub [f64; 6]);

impl Coefficients {
    /// Starting point for the reference fit.
    pub const INITIAL_GUESS: Self = Self([0.03, 0.01, 0.01, 0.01, 0.01, 0.0]);

    /// Combined constant factor `c0 · 4^c2 · 0.155^c3 · 10^c5`.
    #[must_use]
    pub fn prefactor(&self) -> f64 {
        let [c0, _, c2, c3, _, c5] = self.0;
        c0 * DESIGN_BASE_2.powf(c2) * DESIGN_BASE_3.powf(c3) * DESIGN_BASE_5.powf(c5)
    }

    /// Exponent of the viscosity ratio.
    #[must_use]
    pub fn viscosity_exponent(&self) -> f64 {
        self.0[1]
    }

    /// Exponent of the Peclet number.
    #[must_use]
    pub fn peclet_exponent(&self) -> f64 {
        self.0[4]
    }

    /// Normalized temperature drop `ΔT / T_ref`.
    #[must_use]
    pub fn normalized_drop(&self, viscosity_ratio: f64, peclet_number: f64) -> f64 {
        self.prefactor()
            * viscosity_ratio.powf(self.viscosity_exponent())
            * peclet_number.powf(self.peclet_exponent())
    }

    /// Partial derivatives of [`normalized_drop`](Self::normalized_drop) with
    /// respect to `c0..c5`.
    pub(super) fn gradient(&self, viscosity_ratio: f64, peclet_number: f64) -> [f64; 6] {
        let [c0, c1, c2, c3, c4, c5] = self.0;
        let without_c0 = viscosity_ratio.powf(c1)
            * DESIGN_BASE_2.powf(c2)
            * DESIGN_BASE_3.powf(c3)
            * peclet_number.powf(c4)
            * DESIGN_BASE_5.powf(c5);
        let value = c0 * without_c0;

        [
            without_c0,
            value * viscosity_ratio.ln(),
            value * DESIGN_BASE_2.ln(),
            value * DESIGN_BASE_3.ln(),
            value * peclet_number.ln(),
            value * DESIGN_BASE_5.ln(),
        ]
    }

    pub(super) fn to_vector(self) -> DVector<f64> {
        DVector::from_row_slice(&self.0)
    }

    pub(super) fn from_vector(params: &DVector<f64>) -> Self {
        let mut coefficients = [0.0; 6];
        for (c, p) in coefficients.iter_mut().zip(params.iter()) {
            *c = *p;
        }
        Self(coefficients)
    }
}
