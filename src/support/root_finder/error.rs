use thiserror::Error;
use twine_solvers::equation::bisection;

/// Reasons a bracketed root search can fail.
///
/// Errors raised by the function being solved are not represented here;
/// they are returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum RootFindError {
    /// A bound was not finite or the bracket was empty.
    #[error("invalid bracket [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },

    /// The function produced a non-finite value.
    #[error("non-finite value {value} at x={x}")]
    NonFiniteValue { x: f64, value: f64 },

    /// No sign change was found inside the bracket.
    #[error("no sign change in [{lower}, {upper}]")]
    NoSignChange { lower: f64, upper: f64 },

    /// The iteration ceiling was reached before convergence.
    #[error("root finder hit iteration limit: residual={residual}")]
    MaxIters {
        /// Smallest absolute residual encountered.
        residual: f64,

        /// Iterations performed.
        iters: usize,
    },

    /// The underlying bisection solver failed.
    #[error("bisection solver error")]
    Solver(#[from] bisection::Error),
}
