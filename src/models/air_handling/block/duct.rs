use tracing::debug;
use uom::si::{f64::Length, pressure::pascal};

use crate::{
    models::air_handling::{
        FlowState, ProcessError,
        process::{LocalLosses, ProcessResult, ProcessType, conduit_flow},
    },
    support::{
        constraint::{Constrained, NonNegative},
        hydraulics::ConduitStructure,
        root_finder::RootFinderConfig,
    },
};

use super::{Connector, ProcessBlock};

/// A straight run of duct with optional fittings.
#[derive(Debug)]
pub struct DuctBlock {
    inlet: Connector<FlowState>,
    outlet: Connector<FlowState>,
    structure: ConduitStructure,
    length: Length,
    local_losses: LocalLosses,
    config: RootFinderConfig,
    result: Option<ProcessResult>,
}

impl DuctBlock {
    #[must_use]
    pub fn new(structure: ConduitStructure, length: Constrained<Length, NonNegative>) -> Self {
        Self {
            inlet: Connector::new(),
            outlet: Connector::new(),
            structure,
            length: length.into_inner(),
            local_losses: LocalLosses::default(),
            config: RootFinderConfig::default(),
            result: None,
        }
    }

    #[must_use]
    pub fn with_local_losses(mut self, local_losses: LocalLosses) -> Self {
        self.local_losses = local_losses;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RootFinderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn structure(&self) -> &ConduitStructure {
        &self.structure
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }
}

impl ProcessBlock for DuctBlock {
    fn process_type(&self) -> ProcessType {
        ProcessType::ConduitFlow
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

        let inlet = self.inlet.require("duct inlet flow")?;
        let result = conduit_flow(
            inlet,
            &self.structure,
            self.length,
            &self.local_losses,
            &self.config,
        )?;

        debug!(
            loss_pa = result.total_pressure_loss.get::<pascal>(),
            reynolds = result.reynolds_number,
            "duct block"
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
