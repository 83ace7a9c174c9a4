//! Process equations for a humid-air stream.
//!
//! Every process takes the inlet [`FlowState`](super::FlowState) by reference
//! and returns a result record describing the outlet. Inverse variants
//! (`*_from_temperature`, `*_from_relative_humidity`, target-temperature
//! mixing) solve for the unknown driver with
//! [`root_finder`](crate::support::root_finder) and then rerun the forward
//! variant, so every result is self-consistent.

mod conduit;
mod cooling;
mod heating;
mod mixing;
mod mode;
mod pressure_change;
mod result;

pub use conduit::{LocalLosses, conduit_flow};
pub use cooling::{cooling_from_power, cooling_from_relative_humidity, cooling_from_temperature};
pub use heating::{heating_from_power, heating_from_relative_humidity, heating_from_temperature};
pub use mixing::{
    MixingBounds, mixing_for_target_temperature, mixing_of_multiple_flows, mixing_of_two_flows,
};
pub use mode::{CoolingMode, HeatingMode, MixingMode, PressureMode, ProcessType};
pub use pressure_change::pressure_drop_due_to_friction;
pub use result::{
    ConduitFlowResult, CoolingResult, HeatingResult, MixingResult, PressureChangeResult,
    ProcessResult,
};
