use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker for values that are zero or greater.
///
/// Mass flows, pressure drops and local loss coefficients all use this bound.
///
/// # Examples
///
/// ```
/// use twine_hvac::support::constraint::NonNegative;
/// use uom::si::{f64::Pressure, pressure::pascal};
///
/// let dp = NonNegative::new(Pressure::new::<pascal>(300.0)).unwrap();
/// assert_eq!(dp.into_inner().get::<pascal>(), 300.0);
///
/// assert!(NonNegative::new(Pressure::new::<pascal>(-1.0)).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl NonNegative {
    /// Wraps `value` if it is zero or greater.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }

    /// Returns zero as a non-negative value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
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

impl<T: PartialOrd + Zero> Default for Constrained<T, NonNegative> {
    fn default() -> Self {
        NonNegative::zero()
    }
}
