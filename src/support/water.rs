//! Liquid water properties used for condensate and coolant streams.
//!
//! Temperatures are accepted between −100 and 200 °C like the humid-air
//! functions. Water below 0 °C is treated as the 0 °C reference state for
//! enthalpy purposes.

use uom::si::{
    available_energy::{joule_per_kilogram, kilojoule_per_kilogram},
    f64::{MassDensity, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::kilojoule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    psychrometrics::{MAX_TEMPERATURE_C, MIN_TEMPERATURE_C, PropertyError},
    units::SpecificEnthalpy,
};

/// Latent heat of vaporization of water at 0 °C, kJ/kg.
pub const HEAT_OF_VAPORIZATION_KJ_PER_KG: f64 = 2_500.898_292_0;

/// Latent heat of vaporization of water at 0 °C.
#[must_use]
pub fn heat_of_vaporization() -> SpecificEnthalpy {
    SpecificEnthalpy::new::<kilojoule_per_kilogram>(HEAT_OF_VAPORIZATION_KJ_PER_KG)
}

/// Density of liquid water (Kell, 1975).
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] outside the supported temperature range.
pub fn density(t: ThermodynamicTemperature) -> Result<MassDensity, PropertyError> {
    let t = celsius(t)?;
    let numerator = 999.839_52
        + 16.945_176 * t
        - 7.987_040_1e-3 * t.powi(2)
        - 46.170_461e-6 * t.powi(3)
        + 105.563_02e-9 * t.powi(4)
        - 280.542_53e-12 * t.powi(5);
    let rho = numerator / (1.0 + 16.879_850e-3 * t);
    Ok(MassDensity::new::<kilogram_per_cubic_meter>(rho))
}

/// Isobaric specific heat of liquid water.
///
/// Polynomial fits to tabulated data; one branch up to 100 °C and one above.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] outside the supported temperature range.
pub fn specific_heat(t: ThermodynamicTemperature) -> Result<SpecificHeatCapacity, PropertyError> {
    Ok(SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(
        specific_heat_kj(celsius(t)?),
    ))
}

/// Specific enthalpy of liquid water relative to 0 °C, `h = t·cp(t)`.
///
/// Zero below 0 °C.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] outside the supported temperature range.
pub fn specific_enthalpy(t: ThermodynamicTemperature) -> Result<SpecificEnthalpy, PropertyError> {
    let t = celsius(t)?;
    let h = if t < 0.0 {
        0.0
    } else {
        t * specific_heat_kj(t) * 1e3
    };
    Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
}

fn specific_heat_kj(t: f64) -> f64 {
    if t <= 100.0 {
        let t = t.max(0.0);
        3.932_401_61e-13 * t.powi(6) - 1.525_847_751e-10 * t.powi(5)
            + 2.479_227_180e-8 * t.powi(4)
            - 2.166_932_275e-6 * t.powi(3)
            + 1.156_152_199e-4 * t.powi(2)
            - 3.400_567_477e-3 * t
            + 4.219_924_305
    } else {
        2.588_246_403e-15 * t.powi(7) - 3.604_612_987e-12 * t.powi(6)
            + 2.112_059_173e-9 * t.powi(5)
            - 6.727_469_888e-7 * t.powi(4)
            + 1.255_841_880e-4 * t.powi(3)
            - 1.370_455_849e-2 * t.powi(2)
            + 8.093_157_187e-1 * t
            - 15.756_510_97
    }
}

fn celsius(t: ThermodynamicTemperature) -> Result<f64, PropertyError> {
    let t_c = t.get::<degree_celsius>();
    if (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t_c) {
        Ok(t_c)
    } else {
        Err(PropertyError::out_of_domain(format!(
            "water temperature {t_c} °C outside [{MIN_TEMPERATURE_C}, {MAX_TEMPERATURE_C}] °C"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn density_peaks_near_four_degrees() {
        let rho = |t| {
            density(celsius(t))
                .expect("density should succeed")
                .get::<kilogram_per_cubic_meter>()
        };
        assert_relative_eq!(rho(10.0), 999.699_634_372, max_relative = 1e-9);
        assert!(rho(4.0) > rho(0.0));
        assert!(rho(4.0) > rho(10.0));
    }

    #[test]
    fn specific_heat_matches_tabulated_values() {
        for (t, expected) in [(0.01, 4.2199), (20.0, 4.1844), (40.0, 4.1796), (90.0, 4.2053)] {
            let cp = specific_heat(celsius(t)).expect("specific heat should succeed");
            assert_relative_eq!(
                cp.get::<kilojoule_per_kilogram_kelvin>(),
                expected,
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn specific_heat_below_freezing_holds_the_zero_degree_value() {
        let cp = specific_heat(celsius(-5.0)).expect("specific heat should succeed");
        assert_relative_eq!(cp.get::<kilojoule_per_kilogram_kelvin>(), 4.219_924_305);
    }

    #[test]
    fn enthalpy_is_temperature_times_specific_heat() {
        let h = specific_enthalpy(celsius(15.0)).expect("enthalpy should succeed");
        assert_relative_eq!(
            h.get::<kilojoule_per_kilogram>(),
            62.831_393_097_628,
            max_relative = 1e-12
        );

        let frozen = specific_enthalpy(celsius(-10.0)).expect("enthalpy should succeed");
        assert_eq!(frozen.get::<joule_per_kilogram>(), 0.0);
    }

    #[test]
    fn rejects_out_of_range_temperatures() {
        assert!(density(celsius(250.0)).is_err());
    }
}
