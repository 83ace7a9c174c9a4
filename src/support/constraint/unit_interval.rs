use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies the endpoints of the unit interval for a type.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker for values in the lower-open unit interval `0 < x ≤ 1`.
///
/// A target relative humidity uses this bound: a fully dry outlet can never be
/// reached by heating or cooling, while saturation is a valid target.
///
/// # Examples
///
/// ```
/// use twine_hvac::support::constraint::UnitIntervalLowerOpen;
/// use uom::si::{f64::Ratio, ratio::percent};
///
/// let rh = UnitIntervalLowerOpen::new(Ratio::new::<percent>(30.0)).unwrap();
/// assert_eq!(rh.into_inner().get::<percent>(), 30.0);
///
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(0.0)).is_err());
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(100.5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Wraps `value` if `0 < value ≤ 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if the value is zero or less.
    /// - [`ConstraintError::AboveMaximum`] if the value is greater than one.
    /// - [`ConstraintError::NotANumber`] if the value is `NaN`.
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            None => return Err(ConstraintError::NotANumber),
            Some(Ordering::Less | Ordering::Equal) => return Err(ConstraintError::BelowMinimum),
            Some(Ordering::Greater) => {}
        }
        match value.partial_cmp(&T::one()) {
            Some(Ordering::Less | Ordering::Equal) => Ok(()),
            Some(Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::ratio::percent;

    #[test]
    fn accepts_saturation() {
        let rh = UnitIntervalLowerOpen::new(Ratio::new::<percent>(100.0)).unwrap();
        assert_eq!(rh.into_inner().get::<ratio>(), 1.0);
    }

    #[test]
    fn rejects_zero_and_above_one() {
        assert_eq!(
            UnitIntervalLowerOpen::new(0.0),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(
            UnitIntervalLowerOpen::new(1.01),
            Err(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            UnitIntervalLowerOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }
}
