use twine_solvers::equation::bisection;

/// Configuration for [`find_root`](super::find_root) and
/// [`find_root_around`](super::find_root_around).
///
/// Tolerances are in the units of the search variable (`x`) and of the
/// function value (`residual`). Iteration stops as soon as either the bracket
/// width or the residual falls within tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinderConfig {
    /// Hard ceiling on bisection iterations.
    pub max_iters: usize,

    /// Absolute tolerance on the bracket width.
    pub x_abs_tol: f64,

    /// Tolerance on the bracket width relative to `|x|`.
    pub x_rel_tol: f64,

    /// Absolute tolerance on the function value.
    pub residual_tol: f64,

    /// Number of equal sub-brackets probed for a sign change when the
    /// supplied bounds share a sign.
    pub scan_segments: usize,

    /// Maximum number of times [`find_root_around`](super::find_root_around)
    /// doubles its half width while searching for a sign change.
    pub max_expansions: usize,
}

impl Default for RootFinderConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
            scan_segments: 16,
            max_expansions: 32,
        }
    }
}

impl RootFinderConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.x_abs_tol,
            x_rel_tol: self.x_rel_tol,
            residual_tol: self.residual_tol,
        }
    }
}
