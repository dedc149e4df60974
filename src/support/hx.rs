//! Heat exchanger relations.
//!
//! The Stirling engine exchanges heat with its load-side water loop through a
//! heat exchanger characterized by a single conductance `K`.
//! The transfer rate follows the log-mean temperature difference form
//! `Q = K · (ΔT_a − ΔT_b) / ln(ΔT_a / ΔT_b)`.

use thiserror::Error;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

/// Smallest terminal temperature difference used in the log-mean ratio, in K.
///
/// Keeps the ratio finite when the second terminal difference collapses.
pub const LOG_MEAN_FLOOR: f64 = 1e-6;

/// Errors from evaluating a log-mean temperature difference.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LogMeanError {
    /// The terminal differences have opposite signs (or are not numbers),
    /// so the logarithm is undefined.
    #[error("non-positive terminal temperature ratio: {ratio}")]
    NonPositiveRatio { ratio: f64 },
}

/// Computes the log-mean of two terminal temperature differences.
///
/// The second difference is floored at [`LOG_MEAN_FLOOR`] inside the
/// logarithm only.
/// When both differences are equal the log-mean degenerates to that common
/// value, which is returned directly.
///
/// # Errors
///
/// Returns [`LogMeanError::NonPositiveRatio`] if `dt_a / max(dt_b, floor)`
/// is not strictly positive.
pub fn log_mean_temperature_difference(
    dt_a: TemperatureInterval,
    dt_b: TemperatureInterval,
) -> Result<TemperatureInterval, LogMeanError> {
    let a = dt_a.get::<delta_kelvin>();
    let b = dt_b.get::<delta_kelvin>();

    let ratio = a / b.max(LOG_MEAN_FLOOR);
    if ratio.is_nan() || ratio <= 0.0 {
        return Err(LogMeanError::NonPositiveRatio { ratio });
    }

    let ln_ratio = ratio.ln();
    if ln_ratio == 0.0 {
        return Ok(dt_a);
    }

    Ok(TemperatureInterval::new::<delta_kelvin>((a - b) / ln_ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn dt(kelvin: f64) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(kelvin)
    }

    #[test]
    fn matches_closed_form() {
        let lmtd = log_mean_temperature_difference(dt(26.0), dt(16.0)).unwrap();
        let expected = 10.0 / (26.0_f64 / 16.0).ln();
        assert_relative_eq!(lmtd.get::<delta_kelvin>(), expected, epsilon = 1e-12);
    }

    #[test]
    fn lies_between_terminal_differences() {
        let lmtd = log_mean_temperature_difference(dt(40.0), dt(5.0))
            .unwrap()
            .get::<delta_kelvin>();
        assert!(lmtd > 5.0 && lmtd < 40.0);
    }

    #[test]
    fn equal_differences_return_common_value() {
        let lmtd = log_mean_temperature_difference(dt(12.5), dt(12.5)).unwrap();
        assert_relative_eq!(lmtd.get::<delta_kelvin>(), 12.5);
    }

    #[test]
    fn floor_engages_for_collapsed_difference() {
        let lmtd = log_mean_temperature_difference(dt(10.0), dt(0.0))
            .unwrap()
            .get::<delta_kelvin>();
        assert!(lmtd.is_finite());
        assert_relative_eq!(lmtd, 10.0 / (10.0 / LOG_MEAN_FLOOR).ln(), epsilon = 1e-12);
    }

    #[test]
    fn opposite_signs_are_rejected() {
        let err = log_mean_temperature_difference(dt(-3.0), dt(7.0)).unwrap_err();
        assert!(matches!(err, LogMeanError::NonPositiveRatio { ratio } if ratio < 0.0));

        assert!(log_mean_temperature_difference(dt(0.0), dt(7.0)).is_err());
    }
}
