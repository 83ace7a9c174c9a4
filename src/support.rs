//! Supporting utilities used by the air-handling models.
//!
//! These modules have no knowledge of process blocks or pipelines.
//! They provide the collaborator surfaces the models are built on:
//!
//! - [`constraint`]: Validated numeric wrappers.
//! - [`units`]: Quantities and helpers missing from [`uom`].
//! - [`root_finder`]: Bracketed scalar root finding.
//! - [`psychrometrics`]: Humid-air property functions.
//! - [`water`]: Liquid water property functions.
//! - [`hydraulics`]: Conduit geometry, materials and friction equations.

pub mod constraint;
pub mod hydraulics;
pub mod psychrometrics;
pub mod root_finder;
pub mod units;
pub mod water;
