//! Experimental vortex-tube data.

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::constraint::{StrictlyPositive, require};

use super::FitError;

/// Measured cold-end temperature drops, K.
const REFERENCE_DROPS: [f64; 34] = [
    14.0, 13.0, 12.0, 10.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 14.0, 11.0, 12.0, 12.0, 12.0,
    13.0, 13.0, 13.0, 9.0, 10.0, 10.0, 11.0, 11.0, 11.0, 12.0, 8.0, 9.0, 10.0, 10.0, 10.0, 11.0,
    11.0, 15.0, 13.0,
];

const REFERENCE_VISCOSITY_RATIOS: [f64; 34] = [
    0.37, 0.43, 0.54, 0.66, 0.42, 0.42, 0.42, 0.42, 0.42, 0.42, 0.42, 0.51, 0.51, 0.51, 0.51,
    0.51, 0.51, 0.51, 0.61, 0.61, 0.61, 0.61, 0.61, 0.61, 0.61, 0.68, 0.68, 0.68, 0.68, 0.68,
    0.68, 0.68, 0.32, 0.44,
];

const REFERENCE_PECLET_NUMBERS: [f64; 34] = [
    6.92, 6.92, 6.92, 6.92, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
    10.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 6.92, 6.92,
];

/// Inlet temperature of the reference measurements.
const REFERENCE_TEMPERATURE_K: f64 = 293.15;

/// Paired vortex-tube measurements.
///
/// Entry `i` of each column belongs to the same run.
#[derive(Debug, Clone, PartialEq)]
pub struct VortexData {
    temperature_drops: Vec<f64>,
    viscosity_ratios: Vec<f64>,
    peclet_numbers: Vec<f64>,
    reference_temperature: ThermodynamicTemperature,
}

impl VortexData {
    /// Creates a validated data set.
    ///
    /// Temperature drops are in kelvin and are normalized by
    /// `reference_temperature` when fitting.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidData`] if the columns are empty or differ in
    /// length, any value is not finite, a viscosity ratio or Peclet number is
    /// not strictly positive, or the reference temperature is not positive.
    pub fn new(
        temperature_drops: Vec<f64>,
        viscosity_ratios: Vec<f64>,
        peclet_numbers: Vec<f64>,
        reference_temperature: ThermodynamicTemperature,
    ) -> Result<Self, FitError> {
        let len = temperature_drops.len();
        if len == 0 {
            return Err(FitError::invalid("no measurements"));
        }
        if viscosity_ratios.len() != len || peclet_numbers.len() != len {
            return Err(FitError::invalid(format!(
                "column lengths differ: {len} drops, {} viscosity ratios, {} Peclet numbers",
                viscosity_ratios.len(),
                peclet_numbers.len()
            )));
        }

        if let Some(i) = temperature_drops.iter().position(|dt| !dt.is_finite()) {
            return Err(FitError::invalid(format!("temperature drop {i} is not finite")));
        }
        for (name, column) in [
            ("viscosity ratio", &viscosity_ratios),
            ("Peclet number", &peclet_numbers),
        ] {
            for (i, &value) in column.iter().enumerate() {
                require::<StrictlyPositive>(&format!("{name} {i}"), value)?;
            }
        }
        require::<StrictlyPositive>(
            "reference temperature",
            reference_temperature.get::<kelvin>(),
        )?;

        Ok(Self {
            temperature_drops,
            viscosity_ratios,
            peclet_numbers,
            reference_temperature,
        })
    }

    /// The 34 published measurements at 293.15 K.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            temperature_drops: REFERENCE_DROPS.to_vec(),
            viscosity_ratios: REFERENCE_VISCOSITY_RATIOS.to_vec(),
            peclet_numbers: REFERENCE_PECLET_NUMBERS.to_vec(),
            reference_temperature: ThermodynamicTemperature::new::<kelvin>(
                REFERENCE_TEMPERATURE_K,
            ),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature_drops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature_drops.is_empty()
    }

    #[must_use]
    pub fn reference_temperature(&self) -> ThermodynamicTemperature {
        self.reference_temperature
    }

    /// Iterates over `(viscosity ratio, Peclet number, temperature drop)`.
    pub fn measurements(&self) -> impl Iterator<Item = (f64, f64, TemperatureInterval)> + '_ {
        self.viscosity_ratios
            .iter()
            .zip(&self.peclet_numbers)
            .zip(&self.temperature_drops)
            .map(|((&mu, &pe), &dt)| (mu, pe, TemperatureInterval::new::<delta_kelvin>(dt)))
    }

    pub(super) fn viscosity_ratios(&self) -> &[f64] {
        &self.viscosity_ratios
    }

    pub(super) fn peclet_numbers(&self) -> &[f64] {
        &self.peclet_numbers
    }

    /// Temperature drops divided by the reference temperature.
    pub(super) fn normalized_drops(&self) -> Vec<f64> {
        let t_ref = self.reference_temperature.get::<kelvin>();
        self.temperature_drops.iter().map(|dt| dt / t_ref).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_ref() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(293.15)
    }

    #[test]
    fn reference_columns_pair_up() {
        let data = VortexData::reference();
        assert_eq!(data.len(), 34);

        let rebuilt = VortexData::new(
            REFERENCE_DROPS.to_vec(),
            REFERENCE_VISCOSITY_RATIOS.to_vec(),
            REFERENCE_PECLET_NUMBERS.to_vec(),
            t_ref(),
        )
        .unwrap();
        assert_eq!(rebuilt, data);

        let first = data.measurements().next().unwrap();
        assert_eq!((first.0, first.1), (0.37, 6.92));
        assert_eq!(first.2.get::<delta_kelvin>(), 14.0);
    }

    #[test]
    fn rejects_mismatched_or_empty_columns() {
        let err = VortexData::new(vec![10.0, 11.0], vec![0.4], vec![5.0, 6.0], t_ref()).unwrap_err();
        assert!(matches!(err, FitError::InvalidData { .. }));

        let err = VortexData::new(vec![], vec![], vec![], t_ref()).unwrap_err();
        assert!(matches!(err, FitError::InvalidData { .. }));
    }

    #[test]
    fn rejects_non_physical_values() {
        let cases = [
            (vec![f64::NAN], vec![0.4], vec![5.0], t_ref()),
            (vec![10.0], vec![0.0], vec![5.0], t_ref()),
            (vec![10.0], vec![0.4], vec![-5.0], t_ref()),
            (
                vec![10.0],
                vec![0.4],
                vec![5.0],
                ThermodynamicTemperature::new::<kelvin>(0.0),
            ),
        ];

        for (drops, mu, pe, t) in cases {
            assert!(matches!(
                VortexData::new(drops, mu, pe, t),
                Err(FitError::InvalidData { .. })
            ));
        }
    }
}
