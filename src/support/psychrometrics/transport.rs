//! Dynamic viscosity of humid air.
//!
//! Dry air follows Sutherland's law; water vapour uses a linear fit valid
//! between 0 and 200 °C. The two are combined with Wilke's mixing rule on a
//! mole-fraction basis.

const SUTHERLAND_C1: f64 = 1.458e-6;
const SUTHERLAND_S: f64 = 110.4;
const MOLAR_MASS_DRY_AIR: f64 = 28.9645;
const MOLAR_MASS_WATER: f64 = 18.015_28;

/// Dry-air viscosity in Pa·s at absolute temperature `t_k`.
pub(super) fn dry_air(t_k: f64) -> f64 {
    SUTHERLAND_C1 * t_k.powf(1.5) / (t_k + SUTHERLAND_S)
}

/// Water-vapour viscosity in Pa·s at absolute temperature `t_k`.
pub(super) fn water_vapour(t_k: f64) -> f64 {
    3.52e-8 * t_k - 8.67e-7
}

/// Humid-air viscosity in Pa·s for vapour mole fraction `y_v`.
pub(super) fn humid_air(t_k: f64, y_v: f64) -> f64 {
    let mu_a = dry_air(t_k);
    let mu_v = water_vapour(t_k);
    let y_a = 1.0 - y_v;

    let phi_av = wilke(mu_a, mu_v, MOLAR_MASS_DRY_AIR, MOLAR_MASS_WATER);
    let phi_va = wilke(mu_v, mu_a, MOLAR_MASS_WATER, MOLAR_MASS_DRY_AIR);

    y_a * mu_a / (y_a + y_v * phi_av) + y_v * mu_v / (y_v + y_a * phi_va)
}

fn wilke(mu_i: f64, mu_j: f64, m_i: f64, m_j: f64) -> f64 {
    (1.0 + (mu_i / mu_j).sqrt() * (m_j / m_i).powf(0.25)).powi(2)
        / (8.0 * (1.0 + m_i / m_j)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn dry_air_at_room_temperature() {
        assert_relative_eq!(dry_air(293.15), 1.813e-5, max_relative = 2e-3);
    }

    #[test]
    fn vapour_lowers_mixture_viscosity() {
        let dry = humid_air(303.15, 0.0);
        let moist = humid_air(303.15, 0.03);
        assert_relative_eq!(dry, dry_air(303.15), max_relative = 1e-12);
        assert!(moist < dry);
    }
}
