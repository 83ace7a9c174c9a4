//! Adapters exposing a scalar closure to the bisection solver.

use std::{convert::Infallible, error::Error as StdError, marker::PhantomData};

use twine_core::{EquationProblem, Model};

/// Model adapter wrapping `f(x)`.
///
/// The model output is the function value itself.
pub(super) struct ScalarModel<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> ScalarModel<F, E> {
    pub(super) fn new(f: F) -> Self {
        Self {
            f,
            _error: PhantomData,
        }
    }
}

impl<F, E> Model for ScalarModel<F, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    type Input = f64;
    type Output = f64;
    type Error = E;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        (self.f)(*input)
    }
}

/// Equation problem whose residual is the model output.
pub(super) struct ScalarProblem;

impl EquationProblem<1> for ScalarProblem {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([*output])
    }
}
