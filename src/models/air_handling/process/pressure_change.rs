use tracing::debug;
use uom::si::{
    f64::{Power, Pressure, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    volume_rate::cubic_meter_per_second,
};

use crate::{
    models::air_handling::{FlowState, ProcessError},
    support::{
        constraint::NonNegative,
        psychrometrics::{CP_DRY_AIR, CP_WATER_VAPOUR},
    },
};

use super::{PressureChangeResult, PressureMode};

/// Dissipates a friction pressure drop in the stream.
///
/// The flow work `V̇·Δp` is returned to the air as heat, raising its
/// temperature at constant humidity ratio while the pressure falls by `Δp`.
/// A zero drop or a zero flow leaves the stream unchanged.
///
/// # Errors
///
/// Returns [`ProcessError::OutOfBounds`] for a negative pressure drop or one
/// that would leave no absolute pressure.
pub fn pressure_drop_due_to_friction(
    inlet: &FlowState,
    pressure_drop: Pressure,
) -> Result<PressureChangeResult, ProcessError> {
    let dp = NonNegative::new(pressure_drop.get::<pascal>())
        .map_err(|e| ProcessError::out_of_bounds("pressure drop", e.to_string()))?
        .into_inner();

    if dp == 0.0 || inlet.is_zero_flow() {
        return Ok(PressureChangeResult {
            mode: PressureMode::PressureDrop,
            inlet_flow: *inlet,
            outlet_flow: *inlet,
            heat_of_process: Power::new::<watt>(0.0),
            pressure_drop,
        });
    }

    let p_out = inlet.pressure().get::<pascal>() - dp;
    if p_out <= 0.0 {
        return Err(ProcessError::out_of_bounds(
            "pressure drop",
            format!("{dp} Pa exceeds the inlet pressure"),
        ));
    }

    let heat = inlet.volume_flow().get::<cubic_meter_per_second>() * dp;
    let x = inlet.humidity_ratio().get::<ratio>();
    let m_da = inlet.dry_air_mass_flow().get::<kilogram_per_second>();
    let capacity_rate = m_da * (CP_DRY_AIR + x * CP_WATER_VAPOUR);
    let t_out = inlet.temperature().get::<kelvin>() + heat / capacity_rate;

    let outlet = FlowState::new(
        ThermodynamicTemperature::new::<kelvin>(t_out),
        inlet.humidity_ratio(),
        Pressure::new::<pascal>(p_out),
        inlet.dry_air_mass_flow(),
    )?;

    debug!(dp_pa = dp, heat_w = heat, "pressure drop dissipated");

    Ok(PressureChangeResult {
        mode: PressureMode::PressureDrop,
        inlet_flow: *inlet,
        outlet_flow: outlet,
        heat_of_process: Power::new::<watt>(heat),
        pressure_drop,
    })
}
