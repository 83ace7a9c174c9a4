use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Subtraction of absolute temperatures.
///
/// [`uom`] does not define `ThermodynamicTemperature - ThermodynamicTemperature`
/// (see [#380](https://github.com/iliekturtles/uom/issues/380)), yet bypass
/// factors and friction heating are written in terms of such differences.
pub trait TemperatureDifference {
    /// Returns `self - other` as a [`TemperatureInterval`].
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}
