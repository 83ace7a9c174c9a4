//! Conduit geometry, wall materials and friction-loss equations.
//!
//! These are the building blocks of the duct flow process: a
//! [`ConduitStructure`] supplies the cross-section and wall roughness, and
//! the functions in [`equations`] turn a flow through it into velocity,
//! Reynolds number, friction factor and pressure losses.

pub mod equations;
mod material;
mod structure;

pub use material::{Material, MaterialLayer};
pub use structure::{ConduitShape, ConduitStructure};

use thiserror::Error;

use crate::support::{constraint::ConstraintError, root_finder::RootFindError};

/// Errors raised by hydraulic calculations.
#[derive(Debug, Error)]
pub enum HydraulicsError {
    /// A geometric or flow input was rejected.
    #[error("invalid {what}: {source}")]
    InvalidInput {
        what: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The Colebrook–White equation could not be solved.
    #[error("friction factor did not converge")]
    FrictionFactor(#[from] RootFindError),
}

impl HydraulicsError {
    pub(crate) fn invalid(what: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::InvalidInput { what, source }
    }
}
