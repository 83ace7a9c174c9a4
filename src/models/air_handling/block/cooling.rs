use tracing::debug;
use uom::si::{
    f64::{Power, Pressure},
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
};

use crate::{
    models::air_handling::{
        CondensateFlow, CoolantData, FlowState, ProcessError,
        process::{
            ProcessResult, ProcessType, cooling_from_power, cooling_from_relative_humidity,
            cooling_from_temperature, pressure_drop_due_to_friction,
        },
    },
    support::{
        constraint::{Constrained, NonNegative},
        root_finder::RootFinderConfig,
    },
};

use super::{Connector, Driver, ProcessBlock};

/// Cooling coil fed by a coolant.
///
/// Publishes the cooled flow. The coil duty and the condensate are read from
/// the last result.
#[derive(Debug)]
pub struct CoolingBlock {
    inlet: Connector<FlowState>,
    driver: Connector<Driver>,
    coolant: Connector<CoolantData>,
    outlet: Connector<FlowState>,
    coil_pressure_loss: Pressure,
    config: RootFinderConfig,
    result: Option<ProcessResult>,
}

impl CoolingBlock {
    /// A cooling block with no coil pressure loss.
    #[must_use]
    pub fn new(driver: Driver, coolant: CoolantData) -> Self {
        Self {
            inlet: Connector::new(),
            driver: Connector::with_value(driver),
            coolant: Connector::with_value(coolant),
            outlet: Connector::new(),
            coil_pressure_loss: Pressure::new::<pascal>(0.0),
            config: RootFinderConfig::default(),
            result: None,
        }
    }

    /// Sets the pressure lost across the coil.
    #[must_use]
    pub fn with_coil_pressure_loss(mut self, loss: Constrained<Pressure, NonNegative>) -> Self {
        self.coil_pressure_loss = loss.into_inner();
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RootFinderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn coil_pressure_loss(&self) -> Pressure {
        self.coil_pressure_loss
    }

    pub fn driver_connector_mut(&mut self) -> &mut Connector<Driver> {
        &mut self.driver
    }

    pub fn coolant_connector_mut(&mut self) -> &mut Connector<CoolantData> {
        &mut self.coolant
    }

    /// Coil duty of the last successful run, negative when cooling.
    #[must_use]
    pub fn heat_of_process(&self) -> Option<Power> {
        self.result.as_ref().map(ProcessResult::heat_of_process)
    }

    /// Condensate drained in the last successful run.
    #[must_use]
    pub fn condensate(&self) -> Option<&CondensateFlow> {
        match &self.result {
            Some(ProcessResult::Cooling(cooling)) => Some(&cooling.condensate),
            _ => None,
        }
    }
}

impl ProcessBlock for CoolingBlock {
    fn process_type(&self) -> ProcessType {
        ProcessType::Cooling
    }

    fn input_connector(&self) -> &Connector<FlowState> {
        &self.inlet
    }

    fn input_connector_mut(&mut self) -> &mut Connector<FlowState> {
        &mut self.inlet
    }

    fn output_connector(&self) -> &Connector<FlowState> {
        &self.outlet
    }

    fn run_process_calculations(&mut self) -> Result<ProcessResult, ProcessError> {
        self.result = None;
        self.outlet.clear();

        let inlet = *self.inlet.require("cooling inlet flow")?;
        let driver = *self.driver.require("cooling driver")?;
        let coolant = *self.coolant.require("coolant data")?;

        let stage = pressure_drop_due_to_friction(&inlet, self.coil_pressure_loss)?.outlet_flow;
        let config = &self.config;
        let mut result = match driver {
            Driver::Power(power) => cooling_from_power(&stage, &coolant, power, config)?,
            Driver::Temperature(t) => cooling_from_temperature(&stage, &coolant, t, config)?,
            Driver::RelativeHumidity(rh) => {
                cooling_from_relative_humidity(&stage, &coolant, rh, config)?
            }
        };
        result.inlet_flow = inlet;

        debug!(
            mode = ?result.mode,
            heat_w = result.heat_of_process.get::<watt>(),
            condensate_kg_s = result.condensate.mass_flow().get::<kilogram_per_second>(),
            "cooling block"
        );

        self.outlet.refresh(result.outlet_flow);
        let result = ProcessResult::from(result);
        self.result = Some(result.clone());
        Ok(result)
    }

    fn process_result(&self) -> Option<&ProcessResult> {
        self.result.as_ref()
    }
}
