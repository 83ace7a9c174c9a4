use uom::si::{
    f64::{MassRate, Power, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    models::air_handling::ProcessError,
    support::{units::TemperatureDifference, water},
};

/// Lowest accepted coolant temperature, °C.
pub const MIN_COOLANT_TEMPERATURE_C: f64 = 0.0;

/// Highest accepted coolant temperature, °C.
pub const MAX_COOLANT_TEMPERATURE_C: f64 = 90.0;

/// Supply and return temperatures of a cooling-coil coolant.
///
/// Their mean stands in for the coil surface temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolantData {
    supply: ThermodynamicTemperature,
    return_: ThermodynamicTemperature,
}

impl CoolantData {
    /// # Errors
    ///
    /// Returns [`ProcessError::OutOfBounds`] if either temperature lies
    /// outside 0…90 °C.
    pub fn new(
        supply: ThermodynamicTemperature,
        return_: ThermodynamicTemperature,
    ) -> Result<Self, ProcessError> {
        check("coolant supply temperature", supply)?;
        check("coolant return temperature", return_)?;
        Ok(Self { supply, return_ })
    }

    #[must_use]
    pub fn supply_temperature(&self) -> ThermodynamicTemperature {
        self.supply
    }

    #[must_use]
    pub fn return_temperature(&self) -> ThermodynamicTemperature {
        self.return_
    }

    /// Arithmetic mean of supply and return.
    #[must_use]
    pub fn average_wall_temperature(&self) -> ThermodynamicTemperature {
        let mean =
            0.5 * (self.supply.get::<degree_celsius>() + self.return_.get::<degree_celsius>());
        ThermodynamicTemperature::new::<degree_celsius>(mean)
    }

    /// Coolant mass flow that carries away `duty` between supply and return.
    ///
    /// The sign of `duty` is ignored. Water properties are taken at the mean
    /// temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::OutOfBounds`] if a non-zero duty meets a return
    /// temperature that is not above the supply temperature.
    pub fn required_mass_flow(&self, duty: Power) -> Result<MassRate, ProcessError> {
        let q = duty.get::<watt>().abs();
        if q == 0.0 {
            return Ok(MassRate::new::<kilogram_per_second>(0.0));
        }

        let rise = self.return_.minus(self.supply).get::<delta_kelvin>();
        if rise.is_nan() || rise <= 0.0 {
            return Err(ProcessError::out_of_bounds(
                "coolant temperature rise",
                format!("{rise} K must be positive to carry {q} W"),
            ));
        }

        let cp = water::specific_heat(self.average_wall_temperature())?
            .get::<joule_per_kilogram_kelvin>();
        Ok(MassRate::new::<kilogram_per_second>(q / (cp * rise)))
    }
}

fn check(what: &str, t: ThermodynamicTemperature) -> Result<(), ProcessError> {
    let t_c = t.get::<degree_celsius>();
    if (MIN_COOLANT_TEMPERATURE_C..=MAX_COOLANT_TEMPERATURE_C).contains(&t_c) {
        Ok(())
    } else {
        let (lo, hi) = (MIN_COOLANT_TEMPERATURE_C, MAX_COOLANT_TEMPERATURE_C);
        let context = format!("{t_c} °C outside [{lo}, {hi}] °C");
        Err(ProcessError::out_of_bounds(what, context))
    }
}
