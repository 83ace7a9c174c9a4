use uom::si::{
    f64::{MassDensity, MassRate, Power, ThermodynamicTemperature, VolumeRate},
    mass_rate::kilogram_per_second,
};

use crate::{
    models::air_handling::ProcessError,
    support::{constraint::NonNegative, units::SpecificEnthalpy, water},
};

/// Liquid water leaving a cooling coil.
///
/// A zero mass flow means the coil stayed dry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensateFlow {
    temperature: ThermodynamicTemperature,
    mass_flow: MassRate,
    specific_enthalpy: SpecificEnthalpy,
    density: MassDensity,
}

impl CondensateFlow {
    /// # Errors
    ///
    /// Returns [`ProcessError::OutOfBounds`] for a negative mass flow or a
    /// temperature outside the liquid-water validity range.
    pub fn new(
        temperature: ThermodynamicTemperature,
        mass_flow: MassRate,
    ) -> Result<Self, ProcessError> {
        let mass_flow = NonNegative::new(mass_flow)
            .map_err(|e| ProcessError::out_of_bounds("condensate mass flow", e.to_string()))?
            .into_inner();
        Ok(Self {
            temperature,
            mass_flow,
            specific_enthalpy: water::specific_enthalpy(temperature)?,
            density: water::density(temperature)?,
        })
    }

    /// No condensate, at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::OutOfBounds`] for a temperature outside the
    /// liquid-water validity range.
    pub fn zero(temperature: ThermodynamicTemperature) -> Result<Self, ProcessError> {
        Self::new(temperature, MassRate::new::<kilogram_per_second>(0.0))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mass_flow.get::<kilogram_per_second>() == 0.0
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    #[must_use]
    pub fn mass_flow(&self) -> MassRate {
        self.mass_flow
    }

    #[must_use]
    pub fn specific_enthalpy(&self) -> SpecificEnthalpy {
        self.specific_enthalpy
    }

    #[must_use]
    pub fn volume_flow(&self) -> VolumeRate {
        self.mass_flow / self.density
    }

    /// Enthalpy carried away by the condensate.
    #[must_use]
    pub fn enthalpy_flow(&self) -> Power {
        self.mass_flow * self.specific_enthalpy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        power::watt, thermodynamic_temperature::degree_celsius, volume_rate::cubic_meter_per_second,
    };

    #[test]
    fn condensate_carries_liquid_enthalpy() {
        let condensate = CondensateFlow::new(
            ThermodynamicTemperature::new::<degree_celsius>(10.0),
            MassRate::new::<kilogram_per_second>(0.01),
        )
        .expect("condensate should succeed");

        assert_relative_eq!(
            condensate.enthalpy_flow().get::<watt>(),
            419.554_627_7,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            condensate.volume_flow().get::<cubic_meter_per_second>(),
            0.01 / 999.699_634_372,
            max_relative = 1e-9
        );
    }

    #[test]
    fn zero_sentinel() {
        let none = CondensateFlow::zero(ThermodynamicTemperature::new::<degree_celsius>(7.0))
            .expect("condensate should succeed");
        assert!(none.is_zero());
        assert_eq!(none.enthalpy_flow().get::<watt>(), 0.0);
    }
}
