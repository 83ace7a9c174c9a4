use uom::si::{
    f64::{
        MassDensity, MassRate, Pressure, Ratio, SpecificHeatCapacity, ThermodynamicTemperature,
        VolumeRate,
    },
    mass_rate::kilogram_per_second,
    ratio::ratio,
};

use crate::{
    models::air_handling::ProcessError,
    support::{
        constraint::NonNegative, psychrometrics, root_finder::RootFinderConfig,
        units::SpecificEnthalpy,
    },
};

/// Steady-state humid-air stream.
///
/// The primary state is dry-bulb temperature, humidity ratio, total pressure
/// and dry-air mass flow. Enthalpy, relative humidity, specific heat and
/// density are derived once at construction, so a `FlowState` is always
/// internally consistent. Changing any primary quantity builds a new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    temperature: ThermodynamicTemperature,
    humidity_ratio: Ratio,
    pressure: Pressure,
    dry_air_mass_flow: MassRate,
    specific_enthalpy: SpecificEnthalpy,
    relative_humidity: Ratio,
    specific_heat: SpecificHeatCapacity,
    density: MassDensity,
}

impl FlowState {
    /// Creates a stream from its primary state.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::OutOfBounds`] if the dry-air mass flow is
    /// negative or a property input lies outside the humid-air validity range.
    pub fn new(
        temperature: ThermodynamicTemperature,
        humidity_ratio: Ratio,
        pressure: Pressure,
        dry_air_mass_flow: MassRate,
    ) -> Result<Self, ProcessError> {
        let dry_air_mass_flow = NonNegative::new(dry_air_mass_flow)
            .map_err(|e| ProcessError::out_of_bounds("dry-air mass flow", e.to_string()))?
            .into_inner();

        Ok(Self {
            temperature,
            humidity_ratio,
            pressure,
            dry_air_mass_flow,
            specific_enthalpy: psychrometrics::specific_enthalpy(
                temperature,
                humidity_ratio,
                pressure,
            )?,
            relative_humidity: psychrometrics::relative_humidity(
                temperature,
                humidity_ratio,
                pressure,
            )?,
            specific_heat: psychrometrics::specific_heat(humidity_ratio)?,
            density: psychrometrics::density(temperature, humidity_ratio, pressure)?,
        })
    }

    /// Creates a stream from relative humidity instead of humidity ratio.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`], plus an out-of-range relative humidity.
    pub fn from_relative_humidity(
        temperature: ThermodynamicTemperature,
        relative_humidity: Ratio,
        pressure: Pressure,
        dry_air_mass_flow: MassRate,
    ) -> Result<Self, ProcessError> {
        let x = psychrometrics::humidity_ratio(relative_humidity, temperature, pressure)?;
        Self::new(temperature, x, pressure, dry_air_mass_flow)
    }

    /// Creates a stream from the mass flow of humid air (dry air plus vapour).
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`].
    pub fn from_humid_air_mass_flow(
        temperature: ThermodynamicTemperature,
        humidity_ratio: Ratio,
        pressure: Pressure,
        humid_air_mass_flow: MassRate,
    ) -> Result<Self, ProcessError> {
        let dry = humid_air_mass_flow / (1.0 + humidity_ratio.get::<ratio>());
        Self::new(temperature, humidity_ratio, pressure, dry)
    }

    /// Creates a stream from its volumetric flow.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`].
    pub fn from_volume_flow(
        temperature: ThermodynamicTemperature,
        humidity_ratio: Ratio,
        pressure: Pressure,
        volume_flow: VolumeRate,
    ) -> Result<Self, ProcessError> {
        let rho = psychrometrics::density(temperature, humidity_ratio, pressure)?;
        Self::from_humid_air_mass_flow(temperature, humidity_ratio, pressure, volume_flow * rho)
    }

    /// Creates a stream from its volumetric flow and relative humidity.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::from_relative_humidity`].
    pub fn from_volume_flow_and_relative_humidity(
        temperature: ThermodynamicTemperature,
        relative_humidity: Ratio,
        pressure: Pressure,
        volume_flow: VolumeRate,
    ) -> Result<Self, ProcessError> {
        let x = psychrometrics::humidity_ratio(relative_humidity, temperature, pressure)?;
        Self::from_volume_flow(temperature, x, pressure, volume_flow)
    }

    /// Creates a stream whose temperature reproduces `specific_enthalpy`.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`], plus [`ProcessError::NumericalDivergence`]
    /// if the temperature cannot be recovered.
    pub fn from_enthalpy(
        specific_enthalpy: SpecificEnthalpy,
        humidity_ratio: Ratio,
        pressure: Pressure,
        dry_air_mass_flow: MassRate,
        config: &RootFinderConfig,
    ) -> Result<Self, ProcessError> {
        let t = psychrometrics::dry_bulb_temperature(
            specific_enthalpy,
            humidity_ratio,
            pressure,
            config,
        )?;
        Self::new(t, humidity_ratio, pressure, dry_air_mass_flow)
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    #[must_use]
    pub fn humidity_ratio(&self) -> Ratio {
        self.humidity_ratio
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    #[must_use]
    pub fn dry_air_mass_flow(&self) -> MassRate {
        self.dry_air_mass_flow
    }

    /// Enthalpy per kilogram of dry air.
    #[must_use]
    pub fn specific_enthalpy(&self) -> SpecificEnthalpy {
        self.specific_enthalpy
    }

    #[must_use]
    pub fn relative_humidity(&self) -> Ratio {
        self.relative_humidity
    }

    /// Specific heat per kilogram of humid air.
    #[must_use]
    pub fn specific_heat(&self) -> SpecificHeatCapacity {
        self.specific_heat
    }

    /// Density of the humid air.
    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.density
    }

    #[must_use]
    pub fn humid_air_mass_flow(&self) -> MassRate {
        self.dry_air_mass_flow * (1.0 + self.humidity_ratio.get::<ratio>())
    }

    #[must_use]
    pub fn volume_flow(&self) -> VolumeRate {
        self.humid_air_mass_flow() / self.density
    }

    /// `true` when no dry air flows.
    #[must_use]
    pub fn is_zero_flow(&self) -> bool {
        self.dry_air_mass_flow.get::<kilogram_per_second>() == 0.0
    }

    /// Dew point temperature of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::OutOfBounds`] for perfectly dry air.
    pub fn dew_point(
        &self,
        config: &RootFinderConfig,
    ) -> Result<ThermodynamicTemperature, ProcessError> {
        Ok(psychrometrics::dew_point_temperature(
            self.humidity_ratio,
            self.pressure,
            config,
        )?)
    }

    /// The same stream at a different temperature.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`].
    pub fn with_temperature(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Self, ProcessError> {
        Self::new(
            temperature,
            self.humidity_ratio,
            self.pressure,
            self.dry_air_mass_flow,
        )
    }

    /// The same stream with a different humidity ratio.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`].
    pub fn with_humidity_ratio(&self, humidity_ratio: Ratio) -> Result<Self, ProcessError> {
        Self::new(
            self.temperature,
            humidity_ratio,
            self.pressure,
            self.dry_air_mass_flow,
        )
    }

    /// The same stream at a different pressure.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`].
    pub fn with_pressure(&self, pressure: Pressure) -> Result<Self, ProcessError> {
        Self::new(
            self.temperature,
            self.humidity_ratio,
            pressure,
            self.dry_air_mass_flow,
        )
    }

    /// The same air with a different dry-air mass flow.
    ///
    /// # Errors
    ///
    /// Same as [`FlowState::new`].
    pub fn with_dry_air_mass_flow(
        &self,
        dry_air_mass_flow: MassRate,
    ) -> Result<Self, ProcessError> {
        Self::new(
            self.temperature,
            self.humidity_ratio,
            self.pressure,
            dry_air_mass_flow,
        )
    }
}
