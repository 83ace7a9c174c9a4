use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Power, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    models::air_handling::{FlowState, ProcessError},
    support::{
        constraint::UnitIntervalLowerOpen,
        psychrometrics::{self, MAX_TEMPERATURE_C},
        root_finder::{RootFinderConfig, find_root},
        units::SpecificEnthalpy,
    },
};

use super::{HeatingMode, HeatingResult};

/// Heats `inlet` with a known power.
///
/// Heating adds no moisture, so the outlet keeps the inlet humidity ratio and
/// its enthalpy rises by `Q / ṁ_da`.
///
/// # Errors
///
/// Returns [`ProcessError::OutOfBounds`] for negative power, for power applied
/// to a zero flow, or for an outlet outside the humid-air validity range.
pub fn heating_from_power(
    inlet: &FlowState,
    power: Power,
    config: &RootFinderConfig,
) -> Result<HeatingResult, ProcessError> {
    let q = power.get::<watt>();
    if q.is_nan() || q < 0.0 {
        return Err(ProcessError::out_of_bounds(
            "heating power",
            format!("{q} W must be non-negative"),
        ));
    }

    let outlet = if q == 0.0 {
        *inlet
    } else {
        let m_da = inlet.dry_air_mass_flow().get::<kilogram_per_second>();
        if m_da == 0.0 {
            return Err(ProcessError::out_of_bounds(
                "heating power",
                "cannot heat a zero flow",
            ));
        }
        let i_out = inlet.specific_enthalpy().get::<joule_per_kilogram>() + q / m_da;
        FlowState::from_enthalpy(
            SpecificEnthalpy::new::<joule_per_kilogram>(i_out),
            inlet.humidity_ratio(),
            inlet.pressure(),
            inlet.dry_air_mass_flow(),
            config,
        )?
    };

    debug!(
        power_w = q,
        outlet_c = outlet.temperature().get::<degree_celsius>(),
        "heating from power"
    );

    Ok(HeatingResult {
        mode: HeatingMode::FromPower,
        inlet_flow: *inlet,
        outlet_flow: outlet,
        heat_of_process: power,
    })
}

/// Heats `inlet` to a target outlet temperature.
///
/// The power follows in closed form from the enthalpy rise and is then passed
/// through [`heating_from_power`] so the outlet is self-consistent.
///
/// # Errors
///
/// Returns [`ProcessError::InfeasibleConstraint`] if the target is below the
/// inlet temperature.
pub fn heating_from_temperature(
    inlet: &FlowState,
    target: ThermodynamicTemperature,
    config: &RootFinderConfig,
) -> Result<HeatingResult, ProcessError> {
    let t_in = inlet.temperature().get::<degree_celsius>();
    let t_target = target.get::<degree_celsius>();
    if t_target < t_in {
        return Err(ProcessError::infeasible(format!(
            "heating cannot lower the temperature from {t_in} °C to {t_target} °C"
        )));
    }

    if inlet.is_zero_flow() {
        return Ok(HeatingResult {
            mode: HeatingMode::FromTemperature,
            inlet_flow: *inlet,
            outlet_flow: inlet.with_temperature(target)?,
            heat_of_process: Power::new::<watt>(0.0),
        });
    }

    let i_target =
        psychrometrics::specific_enthalpy(target, inlet.humidity_ratio(), inlet.pressure())?;
    let power: Power = inlet.dry_air_mass_flow() * (i_target - inlet.specific_enthalpy());

    let power = Power::new::<watt>(power.get::<watt>().max(0.0));
    let result = heating_from_power(inlet, power, config)?;
    Ok(HeatingResult {
        mode: HeatingMode::FromTemperature,
        ..result
    })
}

/// Heats `inlet` until its relative humidity falls to `target`.
///
/// Relative humidity falls monotonically with temperature at fixed humidity
/// ratio, so the outlet temperature is found on `[t_in, 200 °C]`.
///
/// # Errors
///
/// Returns [`ProcessError::OutOfBounds`] for a target outside `(0, 1]`, and
/// [`ProcessError::InfeasibleConstraint`] for a target above the inlet
/// relative humidity or one not reached by 200 °C.
pub fn heating_from_relative_humidity(
    inlet: &FlowState,
    target: Ratio,
    config: &RootFinderConfig,
) -> Result<HeatingResult, ProcessError> {
    let rh_target = UnitIntervalLowerOpen::new(target)
        .map_err(|e| ProcessError::out_of_bounds("target relative humidity", e.to_string()))?
        .into_inner()
        .get::<ratio>();

    let rh_in = inlet.relative_humidity().get::<ratio>();
    if rh_target > rh_in {
        return Err(ProcessError::infeasible(format!(
            "heating cannot raise relative humidity from {rh_in} to {rh_target}"
        )));
    }

    let x = inlet.humidity_ratio();
    let p = inlet.pressure();
    let rh_at = |t_c: f64| -> Result<f64, ProcessError> {
        let t = ThermodynamicTemperature::new::<degree_celsius>(t_c);
        Ok(psychrometrics::relative_humidity(t, x, p)?.get::<ratio>() - rh_target)
    };

    if rh_at(MAX_TEMPERATURE_C)? > 0.0 {
        return Err(ProcessError::infeasible(format!(
            "relative humidity {rh_target} is not reached below {MAX_TEMPERATURE_C} °C"
        )));
    }

    let t_out = find_root(
        rh_at,
        inlet.temperature().get::<degree_celsius>(),
        MAX_TEMPERATURE_C,
        config,
    )?;

    let result = heating_from_temperature(
        inlet,
        ThermodynamicTemperature::new::<degree_celsius>(t_out),
        config,
    )?;
    Ok(HeatingResult {
        mode: HeatingMode::FromHumidity,
        ..result
    })
}
