//! Humid-air property functions.
//!
//! All functions take the state of moist air as dry-bulb temperature `t`,
//! humidity ratio `x` (kg water per kg dry air) and total pressure `p`.
//! Specific quantities such as enthalpy are expressed per kilogram of dry air.
//!
//! Water in excess of saturation is treated as suspended fog: liquid above
//! 0 °C and ice below. This keeps enthalpy continuous and monotonic in
//! temperature, which is what lets [`dry_bulb_temperature`] invert it.
//!
//! Validity: −100 °C ≤ t ≤ 200 °C, p > 0, x ≥ 0.

mod error;
mod saturation;
mod transport;

pub use error::PropertyError;

use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        DiffusionCoefficient, DynamicViscosity, MassDensity, Pressure, Ratio,
        SpecificHeatCapacity, ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    root_finder::{RootFinderConfig, find_root_around},
    units::SpecificEnthalpy,
};

/// Ratio of molar masses of water and dry air.
pub const MOLAR_MASS_RATIO: f64 = 0.621_945;

/// Specific gas constant of dry air, J/(kg·K).
pub const GAS_CONSTANT_DRY_AIR: f64 = 287.055;

/// Specific heat of dry air, J/(kg·K).
pub const CP_DRY_AIR: f64 = 1_005.0;

/// Specific heat of water vapour, J/(kg·K).
pub const CP_WATER_VAPOUR: f64 = 1_860.0;

/// Specific heat of liquid water fog, J/(kg·K).
pub const CP_WATER_FOG: f64 = 4_190.0;

/// Specific heat of ice fog, J/(kg·K).
pub const CP_ICE_FOG: f64 = 2_090.0;

/// Latent heat of vaporization at 0 °C, J/kg.
pub const HEAT_OF_VAPORIZATION: f64 = 2_500_900.0;

/// Latent heat of fusion at 0 °C, J/kg.
pub const HEAT_OF_FUSION: f64 = 333_600.0;

/// Lowest supported dry-bulb temperature, °C.
pub const MIN_TEMPERATURE_C: f64 = -100.0;

/// Highest supported dry-bulb temperature, °C.
pub const MAX_TEMPERATURE_C: f64 = 200.0;

/// Saturation pressure of water vapour at `t`.
///
/// Over ice below 0 °C, over liquid water above.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] outside −100…200 °C.
pub fn saturation_pressure(t: ThermodynamicTemperature) -> Result<Pressure, PropertyError> {
    let t_c = celsius(t)?;
    Ok(Pressure::new::<pascal>(saturation::pressure(t_c + 273.15)))
}

/// Partial pressure of water vapour for humidity ratio `x` at total pressure `p`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] for a negative humidity ratio or a
/// non-positive pressure.
pub fn vapour_pressure(x: Ratio, p: Pressure) -> Result<Pressure, PropertyError> {
    let x = humidity(x)?;
    let p = total_pressure(p)?;
    Ok(Pressure::new::<pascal>(x * p / (MOLAR_MASS_RATIO + x)))
}

/// Humidity ratio of air at `t` and `p` with relative humidity `rh`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if `rh` is outside `[0, 1]`, if an
/// input is outside the validity range, or if the resulting vapour pressure
/// would reach the total pressure.
pub fn humidity_ratio(
    rh: Ratio,
    t: ThermodynamicTemperature,
    p: Pressure,
) -> Result<Ratio, PropertyError> {
    let rh = rh.get::<ratio>();
    if !(0.0..=1.0).contains(&rh) {
        return Err(PropertyError::out_of_domain(format!(
            "relative humidity {rh} outside [0, 1]"
        )));
    }
    let p = total_pressure(p)?;
    let p_v = rh * saturation::pressure(celsius(t)? + 273.15);
    if p_v >= p {
        return Err(PropertyError::out_of_domain(format!(
            "vapour pressure {p_v} Pa reaches total pressure {p} Pa"
        )));
    }
    Ok(Ratio::new::<ratio>(MOLAR_MASS_RATIO * p_v / (p - p_v)))
}

/// Humidity ratio of saturated air at `t` and `p`.
///
/// Returns an infinite ratio once the saturation pressure reaches the total
/// pressure, since the air can then hold any amount of vapour.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity range.
pub fn max_humidity_ratio(
    t: ThermodynamicTemperature,
    p: Pressure,
) -> Result<Ratio, PropertyError> {
    let p = total_pressure(p)?;
    let p_s = saturation::pressure(celsius(t)? + 273.15);
    Ok(Ratio::new::<ratio>(saturated_humidity_ratio(p_s, p)))
}

/// Relative humidity of air at `t`, `x` and `p`.
///
/// Fogged states (`x` above saturation) report exactly 1.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity range.
pub fn relative_humidity(
    t: ThermodynamicTemperature,
    x: Ratio,
    p: Pressure,
) -> Result<Ratio, PropertyError> {
    let p_v = vapour_pressure(x, p)?.get::<pascal>();
    let p_s = saturation::pressure(celsius(t)? + 273.15);
    Ok(Ratio::new::<ratio>((p_v / p_s).min(1.0)))
}

/// Dew point temperature of air with humidity ratio `x` at pressure `p`.
///
/// Solved by inverting the saturation pressure curve, starting from the
/// Magnus-formula estimate.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] for perfectly dry air or for a dew
/// point outside the validity range, and [`PropertyError::Inversion`] if the
/// root search fails.
pub fn dew_point_temperature(
    x: Ratio,
    p: Pressure,
    config: &RootFinderConfig,
) -> Result<ThermodynamicTemperature, PropertyError> {
    let p_v = vapour_pressure(x, p)?.get::<pascal>();
    let lo = saturation::pressure(MIN_TEMPERATURE_C + 273.15);
    let hi = saturation::pressure(MAX_TEMPERATURE_C + 273.15);
    if !(lo..=hi).contains(&p_v) {
        return Err(PropertyError::out_of_domain(format!(
            "vapour pressure {p_v} Pa has no dew point in the supported range"
        )));
    }

    let guess = saturation::magnus_dew_point(p_v);
    let t_dp = find_root_around(
        |t_c: f64| Ok::<_, PropertyError>(saturation::pressure(t_c + 273.15) - p_v),
        guess,
        (0.1 * guess.abs()).max(1.0),
        [MIN_TEMPERATURE_C, MAX_TEMPERATURE_C],
        config,
    )?;
    Ok(ThermodynamicTemperature::new::<degree_celsius>(t_dp))
}

/// Specific enthalpy of humid air per kilogram of dry air.
///
/// Unsaturated: `i = cp_da·t + x·(r0 + cp_v·t)`.
/// Saturated with fog: the saturated part as above plus the excess water as
/// liquid (`t ≥ 0`) or ice (`t < 0`). Reference state is dry air and liquid
/// water at 0 °C.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity range.
pub fn specific_enthalpy(
    t: ThermodynamicTemperature,
    x: Ratio,
    p: Pressure,
) -> Result<SpecificEnthalpy, PropertyError> {
    let t_c = celsius(t)?;
    let x = humidity(x)?;
    let p = total_pressure(p)?;
    let i = enthalpy(t_c, x, p);
    Ok(SpecificEnthalpy::new::<joule_per_kilogram>(i))
}

/// Dry-bulb temperature of humid air with enthalpy `i`, humidity ratio `x`
/// and pressure `p`.
///
/// The unsaturated closed form never overestimates the temperature, so it
/// seeds the search; fogged states are found by widening the bracket upward.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity
/// range and [`PropertyError::Inversion`] if no temperature in −100…200 °C
/// reproduces `i`.
pub fn dry_bulb_temperature(
    i: SpecificEnthalpy,
    x: Ratio,
    p: Pressure,
    config: &RootFinderConfig,
) -> Result<ThermodynamicTemperature, PropertyError> {
    let i = i.get::<joule_per_kilogram>();
    if !i.is_finite() {
        return Err(PropertyError::out_of_domain(format!(
            "specific enthalpy {i} J/kg is not finite"
        )));
    }
    let x = humidity(x)?;
    let p = total_pressure(p)?;

    let guess = (i - x * HEAT_OF_VAPORIZATION) / (CP_DRY_AIR + x * CP_WATER_VAPOUR);
    let t_c = find_root_around(
        |t_c: f64| Ok::<_, PropertyError>(enthalpy(t_c, x, p) - i),
        guess,
        (0.1 * guess.abs()).max(0.5),
        [MIN_TEMPERATURE_C, MAX_TEMPERATURE_C],
        config,
    )?;
    Ok(ThermodynamicTemperature::new::<degree_celsius>(t_c))
}

/// Density of humid air, kilograms of humid air per cubic metre.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity range.
pub fn density(
    t: ThermodynamicTemperature,
    x: Ratio,
    p: Pressure,
) -> Result<MassDensity, PropertyError> {
    let t_k = celsius(t)? + 273.15;
    let x = humidity(x)?;
    let p = total_pressure(p)?;
    let rho = p / (GAS_CONSTANT_DRY_AIR * t_k) * (1.0 + x) / (1.0 + x / MOLAR_MASS_RATIO);
    Ok(MassDensity::new::<kilogram_per_cubic_meter>(rho))
}

/// Isobaric specific heat of humid air per kilogram of humid air.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] for a negative humidity ratio.
pub fn specific_heat(x: Ratio) -> Result<SpecificHeatCapacity, PropertyError> {
    let x = humidity(x)?;
    let cp = (CP_DRY_AIR + x * CP_WATER_VAPOUR) / (1.0 + x);
    Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp))
}

/// Dynamic viscosity of humid air.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity range.
pub fn dynamic_viscosity(
    t: ThermodynamicTemperature,
    x: Ratio,
) -> Result<DynamicViscosity, PropertyError> {
    let t_k = celsius(t)? + 273.15;
    let x = humidity(x)?;
    let y_v = x / (x + MOLAR_MASS_RATIO);
    let mu = transport::humid_air(t_k, y_v);
    Ok(DynamicViscosity::new::<pascal_second>(mu))
}

/// Kinematic viscosity of humid air, in m²/s.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if an input is outside the validity range.
pub fn kinematic_viscosity(
    t: ThermodynamicTemperature,
    x: Ratio,
    p: Pressure,
) -> Result<DiffusionCoefficient, PropertyError> {
    Ok(dynamic_viscosity(t, x)? / density(t, x, p)?)
}

fn enthalpy(t_c: f64, x: f64, p: f64) -> f64 {
    let x_s = saturated_humidity_ratio(saturation::pressure(t_c + 273.15), p);
    if x <= x_s {
        return CP_DRY_AIR * t_c + x * (HEAT_OF_VAPORIZATION + CP_WATER_VAPOUR * t_c);
    }

    let saturated = CP_DRY_AIR * t_c + x_s * (HEAT_OF_VAPORIZATION + CP_WATER_VAPOUR * t_c);
    if t_c >= 0.0 {
        saturated + (x - x_s) * CP_WATER_FOG * t_c
    } else {
        saturated + (x - x_s) * (CP_ICE_FOG * t_c - HEAT_OF_FUSION)
    }
}

fn saturated_humidity_ratio(p_s: f64, p: f64) -> f64 {
    if p_s >= p {
        f64::INFINITY
    } else {
        MOLAR_MASS_RATIO * p_s / (p - p_s)
    }
}

fn celsius(t: ThermodynamicTemperature) -> Result<f64, PropertyError> {
    let t_c = t.get::<degree_celsius>();
    if (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t_c) {
        Ok(t_c)
    } else {
        Err(PropertyError::out_of_domain(format!(
            "temperature {t_c} °C outside [{MIN_TEMPERATURE_C}, {MAX_TEMPERATURE_C}] °C"
        )))
    }
}

fn humidity(x: Ratio) -> Result<f64, PropertyError> {
    let x = x.get::<ratio>();
    if x >= 0.0 && x.is_finite() {
        Ok(x)
    } else {
        Err(PropertyError::out_of_domain(format!(
            "humidity ratio {x} must be finite and non-negative"
        )))
    }
}

fn total_pressure(p: Pressure) -> Result<f64, PropertyError> {
    let p = p.get::<pascal>();
    if p > 0.0 && p.is_finite() {
        Ok(p)
    } else {
        Err(PropertyError::out_of_domain(format!(
            "pressure {p} Pa must be finite and positive"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        diffusion_coefficient::square_meter_per_second, f64::ThermodynamicTemperature,
        ratio::percent,
    };

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn atm() -> Pressure {
        Pressure::new::<pascal>(101_325.0)
    }

    fn ratio_of(x: f64) -> Ratio {
        Ratio::new::<ratio>(x)
    }

    #[test]
    fn humidity_ratio_and_relative_humidity_are_inverse() {
        let x = humidity_ratio(Ratio::new::<percent>(50.0), celsius(20.0), atm())
            .expect("humidity ratio should succeed");
        assert_relative_eq!(x.get::<ratio>(), 0.007_261_737_207, max_relative = 1e-9);

        let rh = relative_humidity(celsius(20.0), x, atm()).expect("RH should succeed");
        assert_relative_eq!(rh.get::<percent>(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn fogged_air_reports_saturation() {
        let rh = relative_humidity(celsius(10.0), ratio_of(0.02), atm())
            .expect("RH should succeed");
        assert_eq!(rh.get::<ratio>(), 1.0);
    }

    #[test]
    fn dew_point_of_room_air() {
        let x = humidity_ratio(Ratio::new::<percent>(50.0), celsius(20.0), atm()).unwrap();
        let t_dp = dew_point_temperature(x, atm(), &RootFinderConfig::default())
            .expect("dew point should succeed");
        assert_relative_eq!(t_dp.get::<degree_celsius>(), 9.272_392_291, epsilon = 1e-8);
    }

    #[test]
    fn dew_point_of_dry_air_is_undefined() {
        let result = dew_point_temperature(ratio_of(0.0), atm(), &RootFinderConfig::default());
        assert!(matches!(result, Err(PropertyError::OutOfDomain { .. })));
    }

    #[test]
    fn enthalpy_of_unsaturated_air() {
        let i = specific_enthalpy(celsius(25.0), ratio_of(0.01), atm())
            .expect("enthalpy should succeed");
        assert_relative_eq!(i.get::<joule_per_kilogram>(), 50_599.0, epsilon = 1e-9);
    }

    #[test]
    fn dry_bulb_inverts_enthalpy_including_fog() {
        let config = RootFinderConfig::default();
        for (t, x) in [(25.0, 0.01), (10.0, 0.02), (-5.0, 0.01), (-20.0, 0.0), (60.0, 0.1)] {
            let i = specific_enthalpy(celsius(t), ratio_of(x), atm()).unwrap();
            let t_back = dry_bulb_temperature(i, ratio_of(x), atm(), &config)
                .expect("dry-bulb inversion should succeed");
            assert_relative_eq!(t_back.get::<degree_celsius>(), t, epsilon = 1e-9);
        }
    }

    #[test]
    fn density_of_moist_air() {
        let rho = density(celsius(25.0), ratio_of(0.01), atm()).expect("density should succeed");
        assert_relative_eq!(
            rho.get::<kilogram_per_cubic_meter>(),
            1.176_821_936_7,
            max_relative = 1e-9
        );
    }

    #[test]
    fn viscosity_of_moist_air() {
        let x = humidity_ratio(Ratio::new::<percent>(50.0), celsius(10.0), atm()).unwrap();
        let mu = dynamic_viscosity(celsius(10.0), x).expect("viscosity should succeed");
        assert_relative_eq!(
            mu.get::<pascal_second>(),
            1.759_512_332e-5,
            max_relative = 1e-8
        );

        let rho = density(celsius(10.0), x, atm()).expect("density should succeed");
        let nu = kinematic_viscosity(celsius(10.0), x, atm()).expect("viscosity should succeed");
        assert_relative_eq!(
            nu.get::<square_meter_per_second>(),
            mu.get::<pascal_second>() / rho.get::<kilogram_per_cubic_meter>(),
            max_relative = 1e-12
        );
        assert!(nu.get::<square_meter_per_second>() > 1.3e-5);
    }

    #[test]
    fn saturation_reaching_total_pressure_allows_any_humidity() {
        let x_max = max_humidity_ratio(celsius(120.0), atm()).expect("should succeed");
        assert!(x_max.get::<ratio>().is_infinite());
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        assert!(saturation_pressure(celsius(250.0)).is_err());
        assert!(specific_enthalpy(celsius(20.0), ratio_of(-0.001), atm()).is_err());
        assert!(density(celsius(20.0), ratio_of(0.01), Pressure::new::<pascal>(0.0)).is_err());
        assert!(humidity_ratio(Ratio::new::<percent>(120.0), celsius(20.0), atm()).is_err());
    }
}
