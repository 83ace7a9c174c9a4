use uom::si::f64::{Length, Power, Pressure, Ratio, Velocity, Volume};

use crate::{
    models::air_handling::{CondensateFlow, CoolantData, FlowState},
    support::units::LinearPressureLoss,
};

use super::{CoolingMode, HeatingMode, MixingMode, PressureMode, ProcessType};

/// Outcome of a heating process.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatingResult {
    pub mode: HeatingMode,
    pub inlet_flow: FlowState,
    pub outlet_flow: FlowState,
    /// Heat added to the stream (non-negative).
    pub heat_of_process: Power,
}

/// Outcome of a cooling process.
#[derive(Debug, Clone, PartialEq)]
pub struct CoolingResult {
    pub mode: CoolingMode,
    pub inlet_flow: FlowState,
    pub outlet_flow: FlowState,
    /// Heat exchanged with the coil (non-positive).
    pub heat_of_process: Power,
    pub coolant: CoolantData,
    pub condensate: CondensateFlow,
    /// Fraction of the stream that bypasses the coil surface.
    pub bypass_factor: Ratio,
}

/// Outcome of a mixing process.
#[derive(Debug, Clone, PartialEq)]
pub struct MixingResult {
    pub mode: MixingMode,
    pub inlet_flow: FlowState,
    pub outlet_flow: FlowState,
    pub heat_of_process: Power,
    /// Streams mixed into the inlet flow, as actually used.
    pub mixing_flows: Vec<FlowState>,
}

/// Outcome of dissipating a pressure drop in the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureChangeResult {
    pub mode: PressureMode,
    pub inlet_flow: FlowState,
    pub outlet_flow: FlowState,
    /// Flow work converted to heat.
    pub heat_of_process: Power,
    pub pressure_drop: Pressure,
}

/// Outcome of flow through a conduit.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitFlowResult {
    pub mode: PressureMode,
    pub inlet_flow: FlowState,
    pub outlet_flow: FlowState,
    pub heat_of_process: Power,
    pub velocity: Velocity,
    pub reynolds_number: f64,
    /// Darcy friction factor.
    pub friction_factor: f64,
    pub linear_pressure_loss: Pressure,
    pub local_pressure_loss: Pressure,
    pub total_pressure_loss: Pressure,
    pub linear_resistance: LinearPressureLoss,
    pub length: Length,
    /// Inner volume of the conduit.
    pub volume: Volume,
}

/// Result of any air-handling process, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    Heating(HeatingResult),
    Cooling(CoolingResult),
    Mixing(MixingResult),
    PressureChange(PressureChangeResult),
    ConduitFlow(ConduitFlowResult),
}

impl ProcessResult {
    #[must_use]
    pub fn process_type(&self) -> ProcessType {
        match self {
            Self::Heating(_) => ProcessType::Heating,
            Self::Cooling(_) => ProcessType::Cooling,
            Self::Mixing(_) => ProcessType::Mixing,
            Self::PressureChange(_) => ProcessType::PressureChange,
            Self::ConduitFlow(_) => ProcessType::ConduitFlow,
        }
    }

    #[must_use]
    pub fn inlet_flow(&self) -> &FlowState {
        match self {
            Self::Heating(r) => &r.inlet_flow,
            Self::Cooling(r) => &r.inlet_flow,
            Self::Mixing(r) => &r.inlet_flow,
            Self::PressureChange(r) => &r.inlet_flow,
            Self::ConduitFlow(r) => &r.inlet_flow,
        }
    }

    #[must_use]
    pub fn outlet_flow(&self) -> &FlowState {
        match self {
            Self::Heating(r) => &r.outlet_flow,
            Self::Cooling(r) => &r.outlet_flow,
            Self::Mixing(r) => &r.outlet_flow,
            Self::PressureChange(r) => &r.outlet_flow,
            Self::ConduitFlow(r) => &r.outlet_flow,
        }
    }

    #[must_use]
    pub fn heat_of_process(&self) -> Power {
        match self {
            Self::Heating(r) => r.heat_of_process,
            Self::Cooling(r) => r.heat_of_process,
            Self::Mixing(r) => r.heat_of_process,
            Self::PressureChange(r) => r.heat_of_process,
            Self::ConduitFlow(r) => r.heat_of_process,
        }
    }
}

impl From<HeatingResult> for ProcessResult {
    fn from(result: HeatingResult) -> Self {
        Self::Heating(result)
    }
}

impl From<CoolingResult> for ProcessResult {
    fn from(result: CoolingResult) -> Self {
        Self::Cooling(result)
    }
}

impl From<MixingResult> for ProcessResult {
    fn from(result: MixingResult) -> Self {
        Self::Mixing(result)
    }
}

impl From<PressureChangeResult> for ProcessResult {
    fn from(result: PressureChangeResult) -> Self {
        Self::PressureChange(result)
    }
}

impl From<ConduitFlowResult> for ProcessResult {
    fn from(result: ConduitFlowResult) -> Self {
        Self::ConduitFlow(result)
    }
}
