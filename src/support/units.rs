//! Extensions to [`uom`].
//!
//! All physical values in this crate are [`uom`] quantities. This module adds
//! the few quantities the air-handling models need that [`uom`] does not ship,
//! plus a helper for subtracting absolute temperatures.
//!
//! ```
//! use twine_hvac::support::units::TemperatureDifference;
//! use uom::si::{
//!     f64::ThermodynamicTemperature,
//!     temperature_interval::kelvin as delta_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let coil_inlet = ThermodynamicTemperature::new::<degree_celsius>(29.5);
//! let wall = ThermodynamicTemperature::new::<degree_celsius>(10.5);
//! assert!((coil_inlet.minus(wall).get::<delta_kelvin>() - 19.0).abs() < 1e-12);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{LinearPressureLoss, SpecificEnthalpy};
pub use temperature_difference::TemperatureDifference;
