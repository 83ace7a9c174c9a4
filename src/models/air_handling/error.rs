use thiserror::Error;

use crate::support::{
    hydraulics::HydraulicsError, psychrometrics::PropertyError, root_finder::RootFindError,
};

/// Errors raised by air-handling processes, blocks and the processing engine.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A required input was never provided.
    #[error("missing argument: {what}")]
    MissingArgument { what: String },

    /// A physical quantity lies outside its validity range.
    #[error("{what} out of bounds: {reason}")]
    OutOfBounds { what: String, reason: String },

    /// The root finder failed to bracket or converge.
    #[error("numerical divergence")]
    NumericalDivergence(#[from] RootFindError),

    /// A target outcome cannot be reached within the supplied bounds.
    #[error("infeasible constraint: {context}")]
    InfeasibleConstraint { context: String },

    /// A connector was misused or a connection is invalid.
    #[error("wiring error: {context}")]
    Wiring { context: String },
}

impl ProcessError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Self::MissingArgument { what: what.into() }
    }

    pub(crate) fn out_of_bounds(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutOfBounds {
            what: what.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn infeasible(context: impl Into<String>) -> Self {
        Self::InfeasibleConstraint {
            context: context.into(),
        }
    }

    pub(crate) fn wiring(context: impl Into<String>) -> Self {
        Self::Wiring {
            context: context.into(),
        }
    }
}

impl From<PropertyError> for ProcessError {
    fn from(error: PropertyError) -> Self {
        match error {
            PropertyError::OutOfDomain { context } => {
                Self::out_of_bounds("property input", context)
            }
            PropertyError::Inversion(source) => Self::NumericalDivergence(source),
        }
    }
}

impl From<HydraulicsError> for ProcessError {
    fn from(error: HydraulicsError) -> Self {
        match error {
            HydraulicsError::InvalidInput { what, source } => {
                Self::out_of_bounds(what, source.to_string())
            }
            HydraulicsError::FrictionFactor(source) => Self::NumericalDivergence(source),
        }
    }
}
