//! Bracketed root finding for continuous scalar functions.
//!
//! Every inverse problem in this crate reduces to "find `x` such that
//! `f(x) = 0`" for a scalar `f` built on top of a forward property or process
//! function. This module provides that one operation:
//!
//! - [`find_root`] searches a caller-supplied bracket.
//! - [`find_root_around`] starts from a cheap closed-form estimate and widens
//!   a bracket around it until the root is enclosed.
//!
//! Iteration is delegated to [`twine_solvers::equation::bisection`] through a
//! [`twine_core::Model`] adapter, so the hard iteration ceiling and tolerances
//! come from [`RootFinderConfig`].
//!
//! The function under search returns `Result<f64, E>`. Its own errors are
//! propagated unchanged; failures of the search itself are converted into `E`
//! through `From<RootFindError>`.

mod config;
mod error;
mod problem;

pub use config::RootFinderConfig;
pub use error::RootFindError;

use std::error::Error as StdError;

use tracing::trace;
use twine_solvers::equation::bisection;

use problem::{ScalarModel, ScalarProblem};

/// Finds `x` in `[lower, upper]` such that `f(x) ≈ 0`.
///
/// Both bounds are evaluated first. An exact zero at a bound is returned
/// immediately. If the bounds share a sign, the bracket is split into
/// [`RootFinderConfig::scan_segments`] equal parts and the first part with a
/// sign change is searched instead.
///
/// # Example
///
/// ```
/// use twine_hvac::support::root_finder::{RootFindError, RootFinderConfig, find_root};
///
/// let root = find_root(
///     |x: f64| Ok::<_, RootFindError>(x * x - 2.0),
///     0.0,
///     2.0,
///     &RootFinderConfig::default(),
/// )
/// .unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-10);
/// ```
///
/// # Errors
///
/// - [`RootFindError::InvalidBracket`] if a bound is not finite.
/// - [`RootFindError::NonFiniteValue`] if `f` returns a non-finite value.
/// - [`RootFindError::NoSignChange`] if no sign change is found.
/// - [`RootFindError::MaxIters`] if the iteration ceiling is reached.
/// - Any error returned by `f`.
pub fn find_root<F, E>(f: F, lower: f64, upper: f64, config: &RootFinderConfig) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<RootFindError> + StdError + Send + Sync + 'static,
{
    if !lower.is_finite() || !upper.is_finite() {
        return Err(RootFindError::InvalidBracket { lower, upper }.into());
    }
    let (lower, upper) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };

    let f_lower = evaluate(&f, lower)?;
    if f_lower == 0.0 {
        return Ok(lower);
    }
    if lower == upper {
        return Err(RootFindError::NoSignChange { lower, upper }.into());
    }
    let f_upper = evaluate(&f, upper)?;
    if f_upper == 0.0 {
        return Ok(upper);
    }

    if opposite_signs(f_lower, f_upper) {
        return bisect(&f, lower, upper, config);
    }

    match scan(&f, lower, upper, f_lower, f_upper, config.scan_segments)? {
        Scan::Root(x) => Ok(x),
        Scan::Bracket(a, b) => bisect(&f, a, b, config),
        Scan::Nothing => Err(RootFindError::NoSignChange { lower, upper }.into()),
    }
}

/// Finds a root near `guess`, widening the bracket as needed.
///
/// The first bracket is `guess ± half_width`, clipped to `limits`. While the
/// bracket does not enclose a sign change its half width is doubled, up to
/// [`RootFinderConfig::max_expansions`] times. Once the bracket covers
/// `limits` entirely, the search falls back to [`find_root`] over `limits`.
///
/// # Errors
///
/// Same as [`find_root`].
pub fn find_root_around<F, E>(
    f: F,
    guess: f64,
    half_width: f64,
    limits: [f64; 2],
    config: &RootFinderConfig,
) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<RootFindError> + StdError + Send + Sync + 'static,
{
    let [lo_limit, hi_limit] = limits;
    if !lo_limit.is_finite() || !hi_limit.is_finite() || lo_limit > hi_limit {
        return Err(RootFindError::InvalidBracket {
            lower: lo_limit,
            upper: hi_limit,
        }
        .into());
    }

    let guess = if guess.is_finite() {
        guess.clamp(lo_limit, hi_limit)
    } else {
        0.5 * (lo_limit + hi_limit)
    };
    let mut half_width = if half_width.is_finite() && half_width != 0.0 {
        half_width.abs()
    } else {
        1e-3 * (hi_limit - lo_limit)
    };

    for _ in 0..=config.max_expansions {
        let lower = (guess - half_width).max(lo_limit);
        let upper = (guess + half_width).min(hi_limit);
        if lower == lo_limit && upper == hi_limit {
            break;
        }

        let f_lower = evaluate(&f, lower)?;
        if f_lower == 0.0 {
            return Ok(lower);
        }
        let f_upper = evaluate(&f, upper)?;
        if f_upper == 0.0 {
            return Ok(upper);
        }
        if opposite_signs(f_lower, f_upper) {
            trace!(guess, lower, upper, "bracket found around estimate");
            return bisect(&f, lower, upper, config);
        }

        half_width *= 2.0;
    }

    find_root(f, lo_limit, hi_limit, config)
}

/// Outcome of probing sub-brackets for a sign change.
enum Scan {
    Root(f64),
    Bracket(f64, f64),
    Nothing,
}

fn scan<F, E>(
    f: &F,
    lower: f64,
    upper: f64,
    f_lower: f64,
    f_upper: f64,
    segments: usize,
) -> Result<Scan, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<RootFindError>,
{
    let segments = segments.max(2);
    #[allow(clippy::cast_precision_loss)]
    let step = (upper - lower) / segments as f64;

    let (mut x_prev, mut f_prev) = (lower, f_lower);
    for k in 1..segments {
        #[allow(clippy::cast_precision_loss)]
        let x = lower + step * k as f64;
        let fx = evaluate(f, x)?;
        if fx == 0.0 {
            return Ok(Scan::Root(x));
        }
        if opposite_signs(f_prev, fx) {
            trace!(lower = x_prev, upper = x, "sign change found by scan");
            return Ok(Scan::Bracket(x_prev, x));
        }
        (x_prev, f_prev) = (x, fx);
    }

    if opposite_signs(f_prev, f_upper) {
        return Ok(Scan::Bracket(x_prev, upper));
    }
    Ok(Scan::Nothing)
}

/// Runs bisection on a bracket known to enclose a sign change.
fn bisect<F, E>(f: &F, lower: f64, upper: f64, config: &RootFinderConfig) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<RootFindError> + StdError + Send + Sync + 'static,
{
    let model = ScalarModel::new(f);

    let outcome = bisection::solve(
        &model,
        &ScalarProblem,
        [lower, upper],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    );

    let solution = match outcome {
        Ok(solution) => solution,
        Err(bisection::Error::Model(source)) => {
            return Err(match source.downcast::<E>() {
                Ok(err) => *err,
                Err(source) => RootFindError::Solver(bisection::Error::Model(source)).into(),
            });
        }
        Err(err) => return Err(RootFindError::Solver(err).into()),
    };

    if solution.status != bisection::Status::Converged {
        return Err(RootFindError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        }
        .into());
    }

    trace!(
        x = solution.snapshot.input,
        residual = solution.residual,
        iters = solution.iters,
        "root converged"
    );
    Ok(solution.snapshot.input)
}

fn evaluate<F, E>(f: &F, x: f64) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<RootFindError>,
{
    let value = f(x)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RootFindError::NonFiniteValue { x, value }.into())
    }
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use thiserror::Error;

    #[derive(Debug, Error)]
    enum TestError {
        #[error("root finding failed")]
        Root(#[from] RootFindError),
        #[error("outside the function domain")]
        Domain,
    }

    fn config() -> RootFinderConfig {
        RootFinderConfig::default()
    }

    #[test]
    fn finds_square_root_of_two() {
        let root = find_root(|x| Ok::<_, TestError>(x * x - 2.0), 0.0, 2.0, &config())
            .expect("bracketed solve should succeed");
        assert_relative_eq!(root, 2f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn accepts_reversed_bounds() {
        let root = find_root(|x| Ok::<_, TestError>(x - 0.25), 1.0, -1.0, &config())
            .expect("reversed bracket should succeed");
        assert_relative_eq!(root, 0.25, epsilon = 1e-10);
    }

    #[test]
    fn returns_exact_root_at_bound() {
        let root = find_root(|x| Ok::<_, TestError>(x - 3.0), 3.0, 5.0, &config())
            .expect("root at the lower bound should succeed");
        assert_eq!(root, 3.0);
    }

    #[test]
    fn scans_for_interior_sign_change() {
        // Both bounds are positive; roots at 1.5 and 3.5.
        let root = find_root(
            |x| Ok::<_, TestError>((x - 1.5) * (x - 3.5)),
            0.1,
            4.1,
            &config(),
        )
        .expect("scan should locate the first root");
        assert_relative_eq!(root, 1.5, epsilon = 1e-10);
    }

    #[test]
    fn fails_without_sign_change() {
        let result = find_root(|x| Ok::<_, TestError>(x * x + 1.0), -2.0, 2.0, &config());
        assert!(matches!(
            result,
            Err(TestError::Root(RootFindError::NoSignChange { .. }))
        ));
    }

    #[test]
    fn fails_on_non_finite_value() {
        let result = find_root(|x| Ok::<_, TestError>(1.0 / x - 1.0), 0.0, 2.0, &config());
        assert!(matches!(
            result,
            Err(TestError::Root(RootFindError::NonFiniteValue { .. }))
        ));
    }

    #[test]
    fn fails_on_invalid_bracket() {
        let result = find_root(|x| Ok::<_, TestError>(x), f64::NAN, 1.0, &config());
        assert!(matches!(
            result,
            Err(TestError::Root(RootFindError::InvalidBracket { .. }))
        ));
    }

    #[test]
    fn function_errors_pass_through() {
        // The midpoint of the bracket lies outside the function domain.
        let result = find_root(
            |x| {
                if (0.9..1.1).contains(&x) {
                    Err(TestError::Domain)
                } else {
                    Ok(x - 1.0)
                }
            },
            0.0,
            2.0,
            &config(),
        );
        assert!(matches!(result, Err(TestError::Domain)));
    }

    #[test]
    fn iteration_ceiling_is_reported() {
        let tight = RootFinderConfig {
            max_iters: 3,
            x_abs_tol: 0.0,
            x_rel_tol: 0.0,
            residual_tol: 0.0,
            ..RootFinderConfig::default()
        };
        let result = find_root(|x| Ok::<_, TestError>(x - 0.3), 0.0, 1.0, &tight);
        assert!(matches!(
            result,
            Err(TestError::Root(RootFindError::MaxIters { iters: 3, .. }))
        ));
    }

    #[test]
    fn widens_bracket_around_poor_estimate() {
        let root = find_root_around(
            |x| Ok::<_, TestError>(x - 42.0),
            10.0,
            1.0,
            [-100.0, 200.0],
            &config(),
        )
        .expect("expanding search should succeed");
        assert_relative_eq!(root, 42.0, epsilon = 1e-9);
    }

    #[test]
    fn falls_back_to_full_limits() {
        let root = find_root_around(
            |x| Ok::<_, TestError>(x + 99.0),
            150.0,
            0.5,
            [-100.0, 200.0],
            &RootFinderConfig {
                max_expansions: 2,
                ..RootFinderConfig::default()
            },
        )
        .expect("search over the limits should succeed");
        assert_relative_eq!(root, -99.0, epsilon = 1e-9);
    }
}
