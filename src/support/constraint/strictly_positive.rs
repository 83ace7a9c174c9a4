use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker for values that are greater than zero.
///
/// Used for geometry (diameters, widths) and absolute pressures.
///
/// # Examples
///
/// ```
/// use twine_hvac::support::constraint::StrictlyPositive;
/// use uom::si::{f64::Length, length::millimeter};
///
/// let d = StrictlyPositive::new(Length::new::<millimeter>(200.0)).unwrap();
/// assert_eq!(d.into_inner().get::<millimeter>(), 200.0);
///
/// assert!(StrictlyPositive::new(Length::new::<millimeter>(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Wraps `value` if it is greater than zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Pressure, pressure::pascal};

    #[test]
    fn pressures() {
        assert!(StrictlyPositive::new(Pressure::new::<pascal>(101_325.0)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Pressure::new::<pascal>(0.0)),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            StrictlyPositive::new(Pressure::new::<pascal>(-5.0)),
            Err(ConstraintError::Negative)
        );
    }
}
