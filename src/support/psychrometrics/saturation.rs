//! Saturation pressure of water vapour over liquid water and ice.
//!
//! Hyland–Wexler correlations as tabulated in ASHRAE Fundamentals (2017),
//! chapter 1, equations 5 and 6. Temperatures are in kelvin, pressures in Pa.

const ICE: [f64; 7] = [
    -5.674_535_9e3,
    6.392_524_7,
    -9.677_843e-3,
    6.221_570_1e-7,
    2.074_782_5e-9,
    -9.484_024e-13,
    4.163_501_9,
];

const WATER: [f64; 6] = [
    -5.800_220_6e3,
    1.391_499_3,
    -4.864_023_9e-2,
    4.176_476_8e-5,
    -1.445_209_3e-8,
    6.545_967_3,
];

const TRIPLE_POINT_K: f64 = 273.15;

/// Saturation pressure in Pa at absolute temperature `t_k`.
pub(super) fn pressure(t_k: f64) -> f64 {
    if t_k < TRIPLE_POINT_K {
        let [c1, c2, c3, c4, c5, c6, c7] = ICE;
        (c1 / t_k
            + c2
            + c3 * t_k
            + c4 * t_k.powi(2)
            + c5 * t_k.powi(3)
            + c6 * t_k.powi(4)
            + c7 * t_k.ln())
        .exp()
    } else {
        let [c8, c9, c10, c11, c12, c13] = WATER;
        (c8 / t_k + c9 + c10 * t_k + c11 * t_k.powi(2) + c12 * t_k.powi(3) + c13 * t_k.ln())
            .exp()
    }
}

/// Magnus-formula estimate of the temperature in °C at which the saturation
/// pressure equals `p_v` Pa.
pub(super) fn magnus_dew_point(p_v: f64) -> f64 {
    let gamma = (p_v / 611.2).ln();
    243.12 * gamma / (17.62 - gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn matches_ashrae_table_values() {
        // ASHRAE Fundamentals table 3.
        assert_relative_eq!(pressure(293.15), 2_338.8, max_relative = 1e-4);
        assert_relative_eq!(pressure(263.15), 259.90, max_relative = 1e-4);
        assert_relative_eq!(pressure(373.15), 101_418.0, max_relative = 1e-4);
    }

    #[test]
    fn branches_meet_at_triple_point() {
        let below = pressure(TRIPLE_POINT_K - 1e-9);
        let above = pressure(TRIPLE_POINT_K);
        assert_relative_eq!(below, above, max_relative = 1e-3);
    }

    #[test]
    fn magnus_estimate_is_close() {
        let estimate = magnus_dew_point(pressure(283.15));
        assert!((estimate - 10.0).abs() < 0.5);
    }
}
