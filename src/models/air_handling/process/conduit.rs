use tracing::debug;
use uom::si::{
    f64::{Length, Power, Pressure, Velocity},
    length::meter,
    power::watt,
    pressure::pascal,
    velocity::meter_per_second,
};

use crate::{
    models::air_handling::{FlowState, ProcessError},
    support::{
        constraint::NonNegative,
        hydraulics::{ConduitStructure, equations},
        psychrometrics,
        root_finder::RootFinderConfig,
    },
};

use super::{ConduitFlowResult, PressureMode};

/// Fittings along a conduit.
///
/// Each coefficient adds `ζ·ρv²/2`; each pressure loss is added as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalLosses {
    pub coefficients: Vec<f64>,
    pub pressure_losses: Vec<Pressure>,
}

impl LocalLosses {
    /// Sum of all local losses at the given dynamic conditions.
    fn total(&self, flow: &FlowState, velocity: Velocity) -> Result<Pressure, ProcessError> {
        let mut total = Pressure::new::<pascal>(0.0);
        for &zeta in &self.coefficients {
            let zeta = NonNegative::new(zeta)
                .map_err(|e| ProcessError::out_of_bounds("local loss coefficient", e.to_string()))?
                .into_inner();
            total += equations::local_pressure_loss(zeta, flow.density(), velocity);
        }
        for &loss in &self.pressure_losses {
            total += NonNegative::new(loss)
                .map_err(|e| ProcessError::out_of_bounds("local pressure loss", e.to_string()))?
                .into_inner();
        }
        Ok(total)
    }
}

/// Flows `inlet` through `length` of `structure`.
///
/// The friction factor is Colebrook–White for turbulent flow and `64/Re` for
/// laminar flow, evaluated at inlet conditions. The outlet loses the linear
/// plus local losses in pressure and is otherwise unchanged. A zero flow
/// passes through with no losses.
///
/// # Errors
///
/// - [`ProcessError::OutOfBounds`] for a negative length or loss, or for
///   losses that exceed the inlet pressure.
/// - [`ProcessError::NumericalDivergence`] if the friction factor cannot be
///   solved.
pub fn conduit_flow(
    inlet: &FlowState,
    structure: &ConduitStructure,
    length: Length,
    local_losses: &LocalLosses,
    config: &RootFinderConfig,
) -> Result<ConduitFlowResult, ProcessError> {
    let length = NonNegative::new(length)
        .map_err(|e| ProcessError::out_of_bounds("conduit length", e.to_string()))?
        .into_inner();
    let diameter = structure.hydraulic_diameter();
    let zero = Pressure::new::<pascal>(0.0);

    let velocity = equations::flow_velocity(inlet.volume_flow(), structure.area())?;
    let (reynolds, friction_factor, linear, local) = if inlet.is_zero_flow() {
        (0.0, 0.0, zero, zero)
    } else {
        let density = inlet.density();
        let viscosity =
            psychrometrics::dynamic_viscosity(inlet.temperature(), inlet.humidity_ratio())?;
        let reynolds = equations::reynolds_number(velocity, diameter, density, viscosity)?;
        let roughness = structure.absolute_roughness();
        let f = equations::friction_factor(reynolds, diameter, roughness, config)?;
        let linear = equations::linear_pressure_loss(f, diameter, length, density, velocity);
        (reynolds, f, linear, local_losses.total(inlet, velocity)?)
    };

    let total = linear + local;
    let p_out = inlet.pressure() - total;
    if p_out.get::<pascal>() <= 0.0 {
        return Err(ProcessError::out_of_bounds(
            "conduit pressure loss",
            format!("{} Pa exceeds the inlet pressure", total.get::<pascal>()),
        ));
    }
    let outlet = inlet.with_pressure(p_out)?;

    debug!(
        velocity_m_s = velocity.get::<meter_per_second>(),
        reynolds,
        friction_factor,
        loss_pa = total.get::<pascal>(),
        length_m = length.get::<meter>(),
        "conduit flow"
    );

    Ok(ConduitFlowResult {
        mode: PressureMode::ConduitFriction,
        inlet_flow: *inlet,
        outlet_flow: outlet,
        heat_of_process: Power::new::<watt>(0.0),
        velocity,
        reynolds_number: reynolds,
        friction_factor,
        linear_pressure_loss: linear,
        local_pressure_loss: local,
        total_pressure_loss: total,
        linear_resistance: equations::linear_resistance(linear, length),
        length,
        volume: structure.area() * length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Ratio, ThermodynamicTemperature, VolumeRate},
        length::millimeter,
        ratio::percent,
        thermodynamic_temperature::degree_celsius,
        volume::cubic_meter,
        volume_rate::cubic_meter_per_hour,
    };

    use crate::support::{
        constraint::StrictlyPositive,
        hydraulics::{Material, MaterialLayer},
    };

    fn steel_duct() -> ConduitStructure {
        ConduitStructure::circular(
            StrictlyPositive::new(Length::new::<millimeter>(200.0))
                .expect("diameter should succeed"),
            MaterialLayer::sheet(Material::IndustrialSteel),
        )
    }

    fn air(t: f64, volume_m3_h: f64) -> FlowState {
        FlowState::from_volume_flow_and_relative_humidity(
            ThermodynamicTemperature::new::<degree_celsius>(t),
            Ratio::new::<percent>(50.0),
            Pressure::new::<pascal>(101_325.0),
            VolumeRate::new::<cubic_meter_per_hour>(volume_m3_h),
        )
        .expect("flow should succeed")
    }

    #[test]
    fn straight_steel_duct() {
        let inlet = air(10.0, 500.0);
        let result = conduit_flow(
            &inlet,
            &steel_duct(),
            Length::new::<meter>(10.0),
            &LocalLosses::default(),
            &RootFinderConfig::default(),
        )
        .expect("conduit flow should succeed");

        assert_eq!(result.mode, PressureMode::ConduitFriction);
        assert_relative_eq!(
            result.velocity.get::<meter_per_second>(),
            4.420_970_641,
            max_relative = 1e-9
        );
        assert_relative_eq!(result.reynolds_number, 62_502.037_883, max_relative = 1e-9);
        assert_relative_eq!(
            result.friction_factor,
            0.023_335_134_007,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            result.linear_pressure_loss.get::<pascal>(),
            14.181_574_018,
            max_relative = 1e-8
        );
        assert_eq!(result.local_pressure_loss.get::<pascal>(), 0.0);
        assert_relative_eq!(
            result.outlet_flow.pressure().get::<pascal>(),
            101_325.0 - result.total_pressure_loss.get::<pascal>(),
            max_relative = 1e-12
        );
        assert_eq!(result.outlet_flow.temperature(), inlet.temperature());
        assert_eq!(
            result.outlet_flow.dry_air_mass_flow(),
            inlet.dry_air_mass_flow()
        );
    }

    #[test]
    fn fittings_add_to_friction() {
        let local = LocalLosses {
            coefficients: vec![0.4],
            pressure_losses: vec![Pressure::new::<pascal>(20.0)],
        };
        let result = conduit_flow(
            &air(20.0, 500.0),
            &steel_duct(),
            Length::new::<meter>(100.0),
            &local,
            &RootFinderConfig::default(),
        )
        .expect("conduit flow should succeed");

        assert_relative_eq!(
            result.linear_pressure_loss.get::<pascal>(),
            137.736_866_967,
            max_relative = 1e-8
        );
        assert_relative_eq!(
            result.local_pressure_loss.get::<pascal>(),
            24.686_275_415,
            max_relative = 1e-8
        );
        assert_relative_eq!(
            result.total_pressure_loss.get::<pascal>(),
            162.423_142_382,
            max_relative = 1e-8
        );
        assert_relative_eq!(
            result.volume.get::<cubic_meter>(),
            std::f64::consts::PI,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.linear_resistance.value,
            result.linear_pressure_loss.get::<pascal>() / 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_flow_has_no_losses() {
        let inlet = air(20.0, 0.0);
        let result = conduit_flow(
            &inlet,
            &steel_duct(),
            Length::new::<meter>(10.0),
            &LocalLosses {
                coefficients: vec![1.0],
                pressure_losses: vec![],
            },
            &RootFinderConfig::default(),
        )
        .expect("conduit flow should succeed");

        assert_eq!(result.outlet_flow, inlet);
        assert_eq!(result.total_pressure_loss.get::<pascal>(), 0.0);
    }

    #[test]
    fn negative_fitting_coefficient_is_out_of_bounds() {
        let local = LocalLosses {
            coefficients: vec![-0.5],
            pressure_losses: vec![],
        };
        let result = conduit_flow(
            &air(20.0, 500.0),
            &steel_duct(),
            Length::new::<meter>(1.0),
            &local,
            &RootFinderConfig::default(),
        );
        assert!(matches!(result, Err(ProcessError::OutOfBounds { .. })));
    }
}
