//! Cooling-coil processes.
//!
//! The coil is described by its mean wall temperature, taken as the average
//! of the coolant supply and return temperatures. Air leaving the coil is
//! modelled as a blend of air that touched the wall (saturated at the wall
//! temperature) and air that bypassed it unchanged. The bypass factor
//!
//! `BF = (t_out − t_wall) / (t_in − t_wall)`
//!
//! sets both the outlet temperature and, when the wall is below the inlet
//! dew point, the outlet humidity ratio
//!
//! `x_out = BF·x_in + (1 − BF)·x_sat(t_wall)`,
//!
//! capped at saturation at the outlet temperature. The moisture removed
//! leaves as condensate at the wall temperature.

use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Power, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    models::air_handling::{CondensateFlow, CoolantData, FlowState, ProcessError},
    support::{
        constraint::UnitIntervalLowerOpen,
        psychrometrics,
        root_finder::{RootFinderConfig, find_root, find_root_around},
        units::TemperatureDifference,
    },
};

use super::{CoolingMode, CoolingResult};

/// Coil outlet for a given outlet temperature.
struct CoilOutlet {
    outlet: FlowState,
    condensate: CondensateFlow,
    bypass_factor: f64,
    /// Heat exchanged with the coil in W, negative when cooling.
    heat: f64,
}

fn coil_outlet(inlet: &FlowState, t_wall: f64, t_out: f64) -> Result<CoilOutlet, ProcessError> {
    let p = inlet.pressure();
    let t_in = inlet.temperature().get::<degree_celsius>();
    let x_in = inlet.humidity_ratio().get::<ratio>();
    let wall = ThermodynamicTemperature::new::<degree_celsius>(t_wall);
    let out = ThermodynamicTemperature::new::<degree_celsius>(t_out);

    let bypass_factor = if t_in > t_wall {
        let approach = inlet.temperature().minus(wall).get::<delta_kelvin>();
        out.minus(wall).get::<delta_kelvin>() / approach
    } else {
        1.0
    };

    let x_wall = psychrometrics::max_humidity_ratio(wall, p)?.get::<ratio>();
    let x_out = if x_wall < x_in {
        let blended = bypass_factor * x_in + (1.0 - bypass_factor) * x_wall;
        blended
            .min(psychrometrics::max_humidity_ratio(out, p)?.get::<ratio>())
            .min(x_in)
    } else {
        x_in
    };

    let m_da = inlet.dry_air_mass_flow();
    let outlet = FlowState::new(out, Ratio::new::<ratio>(x_out), p, m_da)?;
    let condensate = CondensateFlow::new(wall, m_da * (x_in - x_out))?;

    let heat = m_da.get::<kilogram_per_second>()
        * (outlet.specific_enthalpy() - inlet.specific_enthalpy()).get::<joule_per_kilogram>()
        + condensate.enthalpy_flow().get::<watt>();

    Ok(CoilOutlet {
        outlet,
        condensate,
        bypass_factor,
        heat,
    })
}

fn result(
    mode: CoolingMode,
    inlet: &FlowState,
    coolant: &CoolantData,
    coil: CoilOutlet,
    heat: Power,
) -> CoolingResult {
    CoolingResult {
        mode,
        inlet_flow: *inlet,
        outlet_flow: coil.outlet,
        heat_of_process: heat,
        coolant: *coolant,
        condensate: coil.condensate,
        bypass_factor: Ratio::new::<ratio>(coil.bypass_factor),
    }
}

fn wall_and_inlet(inlet: &FlowState, coolant: &CoolantData) -> (f64, f64) {
    (
        coolant.average_wall_temperature().get::<degree_celsius>(),
        inlet.temperature().get::<degree_celsius>(),
    )
}

/// Cools `inlet` with a known coil duty.
///
/// `power` is the heat exchanged with the coil and must be zero or negative.
/// The outlet temperature is solved on `[t_wall, t_in]`.
///
/// # Errors
///
/// - [`ProcessError::OutOfBounds`] for positive power, for power applied to a
///   zero flow, or for a duty beyond what the coil can remove.
/// - [`ProcessError::InfeasibleConstraint`] if the coil wall is not colder
///   than the inlet air.
pub fn cooling_from_power(
    inlet: &FlowState,
    coolant: &CoolantData,
    power: Power,
    config: &RootFinderConfig,
) -> Result<CoolingResult, ProcessError> {
    let q = power.get::<watt>();
    if q.is_nan() || q > 0.0 {
        return Err(ProcessError::out_of_bounds(
            "cooling power",
            format!("{q} W must be zero or negative"),
        ));
    }

    let (t_wall, t_in) = wall_and_inlet(inlet, coolant);
    if q == 0.0 {
        let coil = coil_outlet(inlet, t_wall, t_in)?;
        return Ok(CoolingResult {
            outlet_flow: *inlet,
            condensate: CondensateFlow::zero(coolant.average_wall_temperature())?,
            ..result(CoolingMode::FromPower, inlet, coolant, coil, power)
        });
    }
    if inlet.is_zero_flow() {
        return Err(ProcessError::out_of_bounds(
            "cooling power",
            "cannot cool a zero flow",
        ));
    }
    if t_wall >= t_in {
        return Err(ProcessError::infeasible(format!(
            "coil wall at {t_wall} °C cannot cool air at {t_in} °C"
        )));
    }

    let q_max = coil_outlet(inlet, t_wall, t_wall)?.heat;
    if q < q_max {
        return Err(ProcessError::out_of_bounds(
            "cooling power",
            format!("{q} W exceeds the maximum coil duty of {q_max} W"),
        ));
    }

    let t_out = find_root(
        |t: f64| Ok::<_, ProcessError>(coil_outlet(inlet, t_wall, t)?.heat - q),
        t_wall,
        t_in,
        config,
    )?;
    let coil = coil_outlet(inlet, t_wall, t_out)?;

    debug!(
        power_w = q,
        outlet_c = t_out,
        condensate_kg_s = coil.condensate.mass_flow().get::<kilogram_per_second>(),
        "cooling from power"
    );

    Ok(result(CoolingMode::FromPower, inlet, coolant, coil, power))
}

/// Cools `inlet` to a target outlet temperature.
///
/// The coil duty is solved on `[Q_max, 0]`, where `Q_max` brings the air all
/// the way down to the wall temperature. The outlet of the bypass model at the
/// target seeds the search.
///
/// # Errors
///
/// Returns [`ProcessError::InfeasibleConstraint`] for a target above the inlet
/// temperature or below the coil wall temperature.
pub fn cooling_from_temperature(
    inlet: &FlowState,
    coolant: &CoolantData,
    target: ThermodynamicTemperature,
    config: &RootFinderConfig,
) -> Result<CoolingResult, ProcessError> {
    let (t_wall, t_in) = wall_and_inlet(inlet, coolant);
    let t_target = target.get::<degree_celsius>();

    if t_target > t_in {
        return Err(ProcessError::infeasible(format!(
            "cooling cannot raise the temperature from {t_in} °C to {t_target} °C"
        )));
    }
    if t_target == t_in {
        let unchanged = cooling_from_power(inlet, coolant, Power::new::<watt>(0.0), config)?;
        return Ok(CoolingResult {
            mode: CoolingMode::FromTemperature,
            ..unchanged
        });
    }
    if t_target < t_wall {
        return Err(ProcessError::infeasible(format!(
            "target {t_target} °C is below the coil wall temperature {t_wall} °C"
        )));
    }

    let estimate = coil_outlet(inlet, t_wall, t_target)?;
    if inlet.is_zero_flow() {
        let heat = Power::new::<watt>(0.0);
        let idle = result(CoolingMode::FromTemperature, inlet, coolant, estimate, heat);
        return Ok(idle);
    }

    let q_max = coil_outlet(inlet, t_wall, t_wall)?.heat;
    let q = find_root_around(
        |q: f64| {
            let cooled = cooling_from_power(inlet, coolant, Power::new::<watt>(q), config)?;
            let t_out = cooled.outlet_flow.temperature().get::<degree_celsius>();
            Ok::<_, ProcessError>(t_out - t_target)
        },
        estimate.heat,
        0.05 * estimate.heat.abs(),
        [q_max, 0.0],
        config,
    )?;

    let solved = cooling_from_power(inlet, coolant, Power::new::<watt>(q), config)?;
    Ok(CoolingResult {
        mode: CoolingMode::FromTemperature,
        ..solved
    })
}

/// Cools `inlet` until its relative humidity rises to `target`.
///
/// The coil duty is solved on `[Q_max, 0]`. The target must lie between the
/// inlet relative humidity and the relative humidity reached at the wall
/// temperature.
///
/// # Errors
///
/// Returns [`ProcessError::OutOfBounds`] for a target outside `(0, 1]`, and
/// [`ProcessError::InfeasibleConstraint`] for a target the coil cannot reach.
pub fn cooling_from_relative_humidity(
    inlet: &FlowState,
    coolant: &CoolantData,
    target: Ratio,
    config: &RootFinderConfig,
) -> Result<CoolingResult, ProcessError> {
    let rh_target = UnitIntervalLowerOpen::new(target)
        .map_err(|e| ProcessError::out_of_bounds("target relative humidity", e.to_string()))?
        .into_inner()
        .get::<ratio>();

    let rh_in = inlet.relative_humidity().get::<ratio>();
    if rh_target < rh_in {
        return Err(ProcessError::infeasible(format!(
            "cooling cannot lower relative humidity from {rh_in} to {rh_target}"
        )));
    }
    if rh_target == rh_in {
        let unchanged = cooling_from_power(inlet, coolant, Power::new::<watt>(0.0), config)?;
        return Ok(CoolingResult {
            mode: CoolingMode::FromHumidity,
            ..unchanged
        });
    }

    let (t_wall, t_in) = wall_and_inlet(inlet, coolant);
    if t_wall >= t_in {
        return Err(ProcessError::infeasible(format!(
            "coil wall at {t_wall} °C cannot cool air at {t_in} °C"
        )));
    }

    let at_wall = coil_outlet(inlet, t_wall, t_wall)?;
    let rh_wall = at_wall.outlet.relative_humidity().get::<ratio>();
    if rh_target > rh_wall {
        return Err(ProcessError::infeasible(format!(
            "relative humidity {rh_target} exceeds {rh_wall} reached at the coil wall"
        )));
    }

    if inlet.is_zero_flow() {
        let t_out = find_root(
            |t: f64| {
                let coil = coil_outlet(inlet, t_wall, t)?;
                Ok::<_, ProcessError>(coil.outlet.relative_humidity().get::<ratio>() - rh_target)
            },
            t_wall,
            t_in,
            config,
        )?;
        let coil = coil_outlet(inlet, t_wall, t_out)?;
        let heat = Power::new::<watt>(0.0);
        let idle = result(CoolingMode::FromHumidity, inlet, coolant, coil, heat);
        return Ok(idle);
    }

    let q = find_root(
        |q: f64| {
            let outlet = cooling_from_power(inlet, coolant, Power::new::<watt>(q), config)?;
            Ok::<_, ProcessError>(outlet.outlet_flow.relative_humidity().get::<ratio>() - rh_target)
        },
        at_wall.heat,
        0.0,
        config,
    )?;

    let solved = cooling_from_power(inlet, coolant, Power::new::<watt>(q), config)?;
    Ok(CoolingResult {
        mode: CoolingMode::FromHumidity,
        ..solved
    })
}
