//! Numeric constraints checked once at construction.
//!
//! Physical inputs to the models in this crate are only meaningful inside
//! certain ranges: absolute temperatures and pressures must be strictly
//! positive, irradiance and wind speed cannot be negative, and efficiencies
//! live in the closed unit interval.
//! These markers express those ranges at the type level.
//!
//! # Provided constraints
//!
//! - [`StrictlyPositive`]: Greater than zero
//! - [`NonNegative`]: Zero or greater
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper.
//! Model constructors that validate a table of named scalars use [`require`],
//! which also rejects infinities and names the offending value in its error.

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::{One, Zero};
use thiserror::Error;

/// A numeric invariant that a value must satisfy.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is not finite")]
    Infinite,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A named scalar that failed its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {source}")]
pub struct Violation {
    pub name: String,
    pub source: ConstraintError,
}

/// Checks that `value` is finite and satisfies `C`.
///
/// Returns the value unchanged so validated fields can be read inline.
///
/// # Errors
///
/// Returns a [`Violation`] carrying `name` if the check fails.
pub fn require<C: Constraint<f64>>(name: &str, value: f64) -> Result<f64, Violation> {
    let checked = if value.is_infinite() {
        Err(ConstraintError::Infinite)
    } else {
        C::check(&value)
    };

    checked.map(|()| value).map_err(|source| Violation {
        name: name.to_owned(),
        source,
    })
}

/// A value that satisfied constraint `C` when it was constructed.
///
/// # Example
///
/// ```
/// use solar_stirling_models::support::constraint::{Constrained, NonNegative};
///
/// let wind = Constrained::<f64, NonNegative>::new(3.5).unwrap();
/// assert_eq!(wind.into_inner(), 3.5);
///
/// assert!(Constrained::<f64, NonNegative>::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> ConstraintResult<Self> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker for values strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(value: T) -> ConstraintResult<Constrained<T, Self>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker for values greater than or equal to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
    pub fn new<T: PartialOrd + Zero>(value: T) -> ConstraintResult<Constrained<T, Self>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker for values in the closed unit interval `[0, 1]`.
///
/// Used for efficiencies, emissivities and effectiveness values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs a [`Constrained<T, UnitInterval>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside `[0, 1]` or `NaN`.
    pub fn new<T: PartialOrd + Zero + One>(value: T) -> ConstraintResult<Constrained<T, Self>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature, Velocity},
        pressure::kilopascal,
        thermodynamic_temperature::kelvin,
        velocity::meter_per_second,
    };

    #[test]
    fn strictly_positive() {
        assert!(StrictlyPositive::new(293.15).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-1.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn strictly_positive_quantities() {
        let p = Pressure::new::<kilopascal>(100.0);
        assert_eq!(StrictlyPositive::new(p).unwrap().into_inner(), p);

        let t = ThermodynamicTemperature::new::<kelvin>(0.0);
        assert!(StrictlyPositive::check(&t.get::<kelvin>()).is_err());
    }

    #[test]
    fn non_negative() {
        let calm = Velocity::new::<meter_per_second>(0.0);
        assert!(NonNegative::new(calm).is_ok());

        let gust = Velocity::new::<meter_per_second>(-2.0);
        assert_eq!(NonNegative::new(gust), Err(ConstraintError::Negative));
    }

    #[test]
    fn require_names_the_value() {
        assert_eq!(require::<StrictlyPositive>("gas mass", 8e-4), Ok(8e-4));
        assert_eq!(require::<NonNegative>("wind speed", 0.0), Ok(0.0));

        let err = require::<StrictlyPositive>("gas mass", 0.0).unwrap_err();
        assert_eq!(err.source, ConstraintError::Zero);
        assert_eq!(err.to_string(), "gas mass: value must not be zero");

        let err = require::<NonNegative>("irradiance", f64::INFINITY).unwrap_err();
        assert_eq!(err.source, ConstraintError::Infinite);
        assert_eq!(
            require::<UnitInterval>("emissivity", f64::NAN).unwrap_err().source,
            ConstraintError::NotANumber
        );
    }

    #[test]
    fn unit_interval() {
        assert_eq!(UnitInterval::new(0.8).unwrap().as_ref(), &0.8);
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert_eq!(UnitInterval::new(-0.1), Err(ConstraintError::BelowMinimum));
        assert_eq!(UnitInterval::new(1.1), Err(ConstraintError::AboveMaximum));
        assert_eq!(UnitInterval::new(f64::NAN), Err(ConstraintError::NotANumber));
    }
}
