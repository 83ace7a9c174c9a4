//! Public models.
//!
//! Models are the primary public interface of this crate. They are organized
//! into domain-specific submodules; today that is [`air_handling`].
//!
//! Each domain keeps its computation in plain functions over typed
//! quantities, and layers wiring (blocks, engines) on top. The functions are
//! usable directly without any of the wiring.

pub mod air_handling;
