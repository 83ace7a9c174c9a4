//! Air-handling processes on a moving humid-air stream.
//!
//! The module is layered:
//!
//! - [`FlowState`], [`CondensateFlow`] and [`CoolantData`] describe the streams.
//! - [`process`] holds the process equations. Each returns a typed result
//!   record and solves for an unknown driver when given a target instead.
//! - [`block`] wraps each process with connectors so it can be wired.
//! - [`SequentialProcessingEngine`] runs blocks in order, feeding each block
//!   the outlet of the one before it.
//!
//! # Example
//!
//! ```
//! use twine_hvac::models::air_handling::{
//!     FlowState, SequentialProcessingEngine,
//!     block::{Driver, HeatingBlock, ProcessBlock},
//! };
//! use uom::si::{
//!     f64::{Pressure, Ratio, ThermodynamicTemperature, VolumeRate},
//!     pressure::pascal,
//!     ratio::percent,
//!     thermodynamic_temperature::degree_celsius,
//!     volume_rate::cubic_meter_per_hour,
//! };
//!
//! let outdoor = FlowState::from_volume_flow_and_relative_humidity(
//!     ThermodynamicTemperature::new::<degree_celsius>(-5.0),
//!     Ratio::new::<percent>(90.0),
//!     Pressure::new::<pascal>(101_325.0),
//!     VolumeRate::new::<cubic_meter_per_hour>(1_500.0),
//! )?;
//!
//! let mut preheater = HeatingBlock::new(Driver::Temperature(
//!     ThermodynamicTemperature::new::<degree_celsius>(5.0),
//! ));
//! preheater.input_connector_mut().set(outdoor)?;
//!
//! let mut engine = SequentialProcessingEngine::new();
//! engine.add_process_node(preheater);
//! engine.add_process_node(HeatingBlock::new(Driver::RelativeHumidity(
//!     Ratio::new::<percent>(35.0),
//! )));
//!
//! let last = engine.run_calculations_for_all_nodes()?;
//! assert!((last.outlet_flow().relative_humidity().get::<percent>() - 35.0).abs() < 1e-6);
//! # Ok::<(), twine_hvac::models::air_handling::ProcessError>(())
//! ```

pub mod block;
mod error;
mod flow;
mod pipeline;
pub mod process;

pub use error::ProcessError;
pub use flow::{CondensateFlow, CoolantData, FlowState};
pub use pipeline::{FlowPort, SequentialProcessingEngine};
