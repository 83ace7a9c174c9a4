//! # Twine HVAC
//!
//! Steady-state humid-air process models for air-handling systems, built for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The crate answers two kinds of questions about a moving humid-air stream:
//!
//! - **Forward**: given a driving quantity (heating power, coil duty, a set of
//!   streams to mix, a pressure drop), what does the outlet look like?
//! - **Inverse**: given a target outcome (outlet temperature, outlet relative
//!   humidity, mixed temperature), which driver produces it?
//!
//! Inverse problems are resolved with bracketed root finding on top of
//! [`twine_solvers::equation::bisection`].
//!
//! ## Crate layout
//!
//! - [`models`]: Air-handling processes, process blocks and the sequential
//!   processing engine.
//! - [`support`]: Property functions, numeric constraints, units and the
//!   scalar root finder used by the models.
//!
//! Modules in [`support`] are public because they are useful on their own,
//! but their APIs are not stable.

pub mod models;
pub mod support;
