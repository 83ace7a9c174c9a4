//! Streams entering and leaving air-handling processes.

mod condensate;
mod coolant;
mod flow_state;

pub use condensate::CondensateFlow;
pub use coolant::CoolantData;
pub use flow_state::FlowState;
