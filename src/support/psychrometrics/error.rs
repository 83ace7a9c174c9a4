use thiserror::Error;

use crate::support::root_finder::RootFindError;

/// Errors raised by humid-air property functions.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// An input lies outside the validity range of the correlation.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// Inverting a property relation numerically failed.
    #[error("property inversion failed")]
    Inversion(#[from] RootFindError),
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }
}
