//! Process blocks: one process wrapped with typed connectors.
//!
//! A block owns its connectors and its last result. Running a block pulls
//! nothing by itself; the [`SequentialProcessingEngine`](super::SequentialProcessingEngine)
//! refreshes bound connectors before each run. Blocks used on their own are
//! fed by setting their connectors directly.
//!
//! Heating and cooling blocks account for their own hydraulic loss first: the
//! inlet passes through [`pressure_drop_due_to_friction`](super::process::pressure_drop_due_to_friction)
//! before the process runs, and the stored result still reports the inlet as
//! it entered the block.

mod connector;
mod cooling;
mod duct;
mod heating;
mod mixing;
mod pressure_drop;

use std::fmt::Debug;

pub use connector::Connector;
pub use cooling::CoolingBlock;
pub use duct::DuctBlock;
pub use heating::HeatingBlock;
pub use mixing::MixingBlock;
pub use pressure_drop::PressureDropBlock;

use uom::si::f64::{Power, Ratio, ThermodynamicTemperature};

use super::{
    FlowState, ProcessError,
    process::{ProcessResult, ProcessType},
};

/// A process step with a flow inlet and a flow outlet.
pub trait ProcessBlock: Debug {
    fn process_type(&self) -> ProcessType;

    fn input_connector(&self) -> &Connector<FlowState>;

    fn input_connector_mut(&mut self) -> &mut Connector<FlowState>;

    fn output_connector(&self) -> &Connector<FlowState>;

    /// Extra flow inputs, such as the streams a mixing block mixes in.
    fn auxiliary_flow_connectors_mut(&mut self) -> Vec<&mut Connector<FlowState>> {
        Vec::new()
    }

    /// Runs the process on the current connector values.
    ///
    /// On success the result is stored and the outlet published. A failed run
    /// leaves no stored result.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::MissingArgument`] if a required connector is
    /// empty, or any error raised by the process itself.
    fn run_process_calculations(&mut self) -> Result<ProcessResult, ProcessError>;

    /// Result of the last successful run.
    fn process_result(&self) -> Option<&ProcessResult>;
}

/// What drives a heating or cooling block.
///
/// A power is applied directly; a temperature or relative humidity is a
/// target the block solves the power for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Driver {
    Power(Power),
    Temperature(ThermodynamicTemperature),
    RelativeHumidity(Ratio),
}
