use tracing::debug;
use uom::si::{
    f64::{Power, Pressure},
    power::watt,
    pressure::pascal,
};

use crate::{
    models::air_handling::{
        FlowState, ProcessError,
        process::{
            ProcessResult, ProcessType, heating_from_power, heating_from_relative_humidity,
            heating_from_temperature, pressure_drop_due_to_friction,
        },
    },
    support::{
        constraint::{Constrained, NonNegative},
        root_finder::RootFinderConfig,
    },
};

use super::{Connector, Driver, ProcessBlock};

/// Heating coil.
///
/// Publishes the heated flow. The heat added is read from the last result.
#[derive(Debug)]
pub struct HeatingBlock {
    inlet: Connector<FlowState>,
    driver: Connector<Driver>,
    outlet: Connector<FlowState>,
    coil_pressure_loss: Pressure,
    config: RootFinderConfig,
    result: Option<ProcessResult>,
}

impl HeatingBlock {
    /// A heating block with no coil pressure loss.
    #[must_use]
    pub fn new(driver: Driver) -> Self {
        Self {
            inlet: Connector::new(),
            driver: Connector::with_value(driver),
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

    /// Heat added by the coil in the last successful run.
    #[must_use]
    pub fn heat_of_process(&self) -> Option<Power> {
        self.result.as_ref().map(ProcessResult::heat_of_process)
    }
}

impl ProcessBlock for HeatingBlock {
    fn process_type(&self) -> ProcessType {
        ProcessType::Heating
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

        let inlet = *self.inlet.require("heating inlet flow")?;
        let driver = *self.driver.require("heating driver")?;

        let stage = pressure_drop_due_to_friction(&inlet, self.coil_pressure_loss)?.outlet_flow;
        let mut result = match driver {
            Driver::Power(power) => heating_from_power(&stage, power, &self.config)?,
            Driver::Temperature(t) => heating_from_temperature(&stage, t, &self.config)?,
            Driver::RelativeHumidity(rh) => {
                heating_from_relative_humidity(&stage, rh, &self.config)?
            }
        };
        result.inlet_flow = inlet;

        debug!(
            mode = ?result.mode,
            heat_w = result.heat_of_process.get::<watt>(),
            "heating block"
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
