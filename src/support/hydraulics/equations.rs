//! Friction and local pressure-loss equations for fully developed flow.
//!
//! Dimensionless groups (Reynolds number, friction factor, loss
//! coefficients) are plain `f64`.

use uom::si::{
    area::square_meter,
    dynamic_viscosity::pascal_second,
    f64::{Area, DynamicViscosity, Length, MassDensity, Pressure, Velocity, VolumeRate},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    velocity::meter_per_second,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive},
    root_finder::{RootFinderConfig, find_root_around},
    units::LinearPressureLoss,
};

use super::HydraulicsError;

/// Reynolds number at or below which flow is treated as laminar.
pub const LAMINAR_LIMIT: f64 = 2_300.0;

/// Mean velocity of `volume_flow` through `area`.
///
/// # Errors
///
/// Returns [`HydraulicsError::InvalidInput`] if `area` is not positive or
/// `volume_flow` is negative.
pub fn flow_velocity(volume_flow: VolumeRate, area: Area) -> Result<Velocity, HydraulicsError> {
    let q = NonNegative::new(volume_flow.get::<cubic_meter_per_second>())
        .map_err(HydraulicsError::invalid("volumetric flow"))?;
    let a = StrictlyPositive::new(area.get::<square_meter>())
        .map_err(HydraulicsError::invalid("flow area"))?;
    Ok(Velocity::new::<meter_per_second>(
        q.into_inner() / a.into_inner(),
    ))
}

/// Reynolds number `ρ·v·D/μ`.
///
/// # Errors
///
/// Returns [`HydraulicsError::InvalidInput`] if `viscosity` is not positive.
pub fn reynolds_number(
    velocity: Velocity,
    hydraulic_diameter: Length,
    density: MassDensity,
    viscosity: DynamicViscosity,
) -> Result<f64, HydraulicsError> {
    let mu = StrictlyPositive::new(viscosity.get::<pascal_second>())
        .map_err(HydraulicsError::invalid("dynamic viscosity"))?;
    Ok(density.get::<kilogram_per_cubic_meter>()
        * velocity.get::<meter_per_second>()
        * hydraulic_diameter.get::<meter>()
        / mu.into_inner())
}

/// Darcy friction factor for laminar flow, `64/Re`.
#[must_use]
pub fn friction_factor_laminar(reynolds: f64) -> f64 {
    64.0 / reynolds
}

/// Explicit approximation of the Colebrook–White friction factor
/// (Vatankhah, 2014).
#[must_use]
pub fn friction_factor_vatankhah(
    reynolds: f64,
    hydraulic_diameter: Length,
    roughness: Length,
) -> f64 {
    let r = roughness.get::<meter>() / hydraulic_diameter.get::<meter>();
    let delta = 6.0173 / (reynolds * (0.07 * r + reynolds.powf(-0.885)).powf(0.109)) + r / 3.71;
    let numerator = 2.51 / reynolds + 1.1513 * delta;
    let denominator = delta - r / 3.71 - 2.3026 * delta * delta.log10();
    (numerator / denominator).powi(2)
}

/// Darcy friction factor from the implicit Colebrook–White equation.
///
/// The search starts from the bracket 0.905–1.105 times the Vatankhah
/// estimate and widens only if that bracket misses the root.
///
/// # Errors
///
/// Returns [`HydraulicsError::FrictionFactor`] if no root is found.
pub fn friction_factor_colebrook(
    reynolds: f64,
    hydraulic_diameter: Length,
    roughness: Length,
    config: &RootFinderConfig,
) -> Result<f64, HydraulicsError> {
    let r = roughness.get::<meter>() / (3.7 * hydraulic_diameter.get::<meter>());
    let estimate = friction_factor_vatankhah(reynolds, hydraulic_diameter, roughness);

    find_root_around(
        |f: f64| {
            let sqrt_f = f.sqrt();
            Ok::<_, HydraulicsError>(1.0 / sqrt_f + 2.0 * (r + 2.51 / (reynolds * sqrt_f)).log10())
        },
        1.005 * estimate,
        0.1 * estimate,
        [1e-4, 1.0],
        config,
    )
}

/// Darcy friction factor for any flow regime.
///
/// # Errors
///
/// Returns [`HydraulicsError::InvalidInput`] if `reynolds` is not positive,
/// and [`HydraulicsError::FrictionFactor`] if the turbulent solve fails.
pub fn friction_factor(
    reynolds: f64,
    hydraulic_diameter: Length,
    roughness: Length,
    config: &RootFinderConfig,
) -> Result<f64, HydraulicsError> {
    let reynolds = StrictlyPositive::new(reynolds)
        .map_err(HydraulicsError::invalid("Reynolds number"))?
        .into_inner();
    if reynolds <= LAMINAR_LIMIT {
        Ok(friction_factor_laminar(reynolds))
    } else {
        friction_factor_colebrook(reynolds, hydraulic_diameter, roughness, config)
    }
}

/// Dynamic pressure `ρ·v²/2`.
#[must_use]
pub fn dynamic_pressure(density: MassDensity, velocity: Velocity) -> Pressure {
    let v = velocity.get::<meter_per_second>();
    Pressure::new::<pascal>(0.5 * density.get::<kilogram_per_cubic_meter>() * v * v)
}

/// Darcy–Weisbach friction loss over `length`, `f·L/D·ρv²/2`.
#[must_use]
pub fn linear_pressure_loss(
    friction_factor: f64,
    hydraulic_diameter: Length,
    length: Length,
    density: MassDensity,
    velocity: Velocity,
) -> Pressure {
    dynamic_pressure(density, velocity)
        * (friction_factor * length.get::<meter>() / hydraulic_diameter.get::<meter>())
}

/// Friction loss per metre. Zero for a zero-length conduit.
#[must_use]
pub fn linear_resistance(pressure_loss: Pressure, length: Length) -> LinearPressureLoss {
    if length.get::<meter>() > 0.0 {
        pressure_loss / length
    } else {
        pressure_loss / Length::new::<meter>(1.0) * 0.0
    }
}

/// Loss through a fitting with loss coefficient `zeta`, `ζ·ρv²/2`.
#[must_use]
pub fn local_pressure_loss(zeta: f64, density: MassDensity, velocity: Velocity) -> Pressure {
    dynamic_pressure(density, velocity) * zeta
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::millimeter;

    fn mm(value: f64) -> Length {
        Length::new::<millimeter>(value)
    }

    #[test]
    fn velocity_through_a_round_duct() {
        let v = flow_velocity(
            VolumeRate::new::<cubic_meter_per_second>(0.5),
            Area::new::<square_meter>(0.1),
        )
        .expect("velocity should succeed");
        assert_relative_eq!(v.get::<meter_per_second>(), 5.0);

        let no_area = Area::new::<square_meter>(0.0);
        assert!(flow_velocity(VolumeRate::new::<cubic_meter_per_second>(0.5), no_area).is_err());
    }

    #[test]
    fn laminar_regime_uses_hagen_poiseuille() {
        let f = friction_factor(1_600.0, mm(200.0), mm(0.2), &RootFinderConfig::default())
            .expect("friction factor should succeed");
        assert_relative_eq!(f, 0.04);
    }

    #[test]
    fn colebrook_for_a_steel_duct() {
        let config = RootFinderConfig::default();
        for (re, expected) in [(62_502.04, 0.023_335_133_909), (224_113.8, 0.020_897_965_660)] {
            let f = friction_factor(re, mm(200.0), mm(0.2), &config)
                .expect("friction factor should succeed");
            assert_relative_eq!(f, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn vatankhah_estimate_is_close_to_colebrook() {
        let config = RootFinderConfig::default();
        for (re, d, k) in [(1e5, 200.0, 0.0015), (3_000.0, 50.0, 0.001), (1e7, 500.0, 1.0)] {
            let exact = friction_factor_colebrook(re, mm(d), mm(k), &config)
                .expect("friction factor should succeed");
            let estimate = friction_factor_vatankhah(re, mm(d), mm(k));
            assert_relative_eq!(estimate, exact, max_relative = 2e-3);
        }
    }

    #[test]
    fn smooth_duct_friction_factor() {
        let f = friction_factor(1e5, mm(200.0), mm(0.0015), &RootFinderConfig::default())
            .expect("friction factor should succeed");
        assert_relative_eq!(f, 0.018_030_330_99, max_relative = 1e-8);
    }

    #[test]
    fn zero_reynolds_number_is_rejected() {
        let result = friction_factor(0.0, mm(200.0), mm(0.2), &RootFinderConfig::default());
        assert!(matches!(result, Err(HydraulicsError::InvalidInput { .. })));
    }

    #[test]
    fn linear_and_local_losses() {
        let rho = MassDensity::new::<kilogram_per_cubic_meter>(1.2);
        let v = Velocity::new::<meter_per_second>(5.0);

        let linear = linear_pressure_loss(0.02, mm(200.0), Length::new::<meter>(10.0), rho, v);
        assert_relative_eq!(linear.get::<pascal>(), 15.0, max_relative = 1e-12);

        let per_metre = linear_resistance(linear, Length::new::<meter>(10.0));
        assert_relative_eq!(per_metre.value, 1.5, max_relative = 1e-12);
        assert_eq!(
            linear_resistance(linear, Length::new::<meter>(0.0)).value,
            0.0
        );

        let local = local_pressure_loss(0.4, rho, v);
        assert_relative_eq!(local.get::<pascal>(), 6.0, max_relative = 1e-12);
    }
}
