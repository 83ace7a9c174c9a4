//! Adiabatic mixing of humid-air streams.
//!
//! Dry air, moisture and enthalpy are conserved. The mixed humidity ratio and
//! specific enthalpy are dry-air mass weighted averages, and the mixed
//! temperature is recovered by inverting the enthalpy. The mixed stream leaves
//! at the lowest of the inlet pressures.

use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Power, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    models::air_handling::{FlowState, ProcessError},
    support::{
        constraint::NonNegative,
        root_finder::{RootFinderConfig, find_root},
        units::SpecificEnthalpy,
    },
};

use super::{MixingMode, MixingResult};

/// Flow limits for [`mixing_for_target_temperature`].
///
/// All values are dry-air mass flows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingBounds {
    /// Smallest admissible flow through the inlet branch.
    pub min_inlet_flow: MassRate,
    /// Smallest admissible flow through the recirculation branch.
    pub min_recirculation_flow: MassRate,
    /// Required flow of the mixed stream.
    pub total_flow: MassRate,
}

/// Mixes two streams.
///
/// Two empty streams mix to `a`.
fn mix_pair(
    a: &FlowState,
    b: &FlowState,
    config: &RootFinderConfig,
) -> Result<FlowState, ProcessError> {
    let m_a = a.dry_air_mass_flow().get::<kilogram_per_second>();
    let m_b = b.dry_air_mass_flow().get::<kilogram_per_second>();
    let m = m_a + m_b;
    if m == 0.0 {
        return Ok(*a);
    }

    let weighted = |va: f64, vb: f64| (m_a * va + m_b * vb) / m;
    let x = weighted(
        a.humidity_ratio().get::<ratio>(),
        b.humidity_ratio().get::<ratio>(),
    );
    let i = weighted(
        a.specific_enthalpy().get::<joule_per_kilogram>(),
        b.specific_enthalpy().get::<joule_per_kilogram>(),
    );
    let p = if b.pressure().get::<pascal>() < a.pressure().get::<pascal>() {
        b.pressure()
    } else {
        a.pressure()
    };

    FlowState::from_enthalpy(
        SpecificEnthalpy::new::<joule_per_kilogram>(i),
        Ratio::new::<ratio>(x),
        p,
        MassRate::new::<kilogram_per_second>(m),
        config,
    )
}

/// Mixes `other` into `inlet`.
///
/// # Errors
///
/// Returns [`ProcessError::NumericalDivergence`] if the mixed temperature
/// cannot be recovered, or [`ProcessError::OutOfBounds`] if it falls outside
/// the humid-air validity range.
pub fn mixing_of_two_flows(
    inlet: &FlowState,
    other: &FlowState,
    config: &RootFinderConfig,
) -> Result<MixingResult, ProcessError> {
    let outlet = mix_pair(inlet, other, config)?;
    Ok(MixingResult {
        mode: MixingMode::SimpleMixing,
        inlet_flow: *inlet,
        outlet_flow: outlet,
        heat_of_process: Power::new::<watt>(0.0),
        mixing_flows: vec![*other],
    })
}

/// Folds every stream in `others` into `inlet`, in order.
///
/// With no other streams the outlet equals the inlet.
///
/// # Errors
///
/// Same as [`mixing_of_two_flows`].
pub fn mixing_of_multiple_flows(
    inlet: &FlowState,
    others: &[FlowState],
    config: &RootFinderConfig,
) -> Result<MixingResult, ProcessError> {
    let outlet = others
        .iter()
        .try_fold(*inlet, |mixed, other| mix_pair(&mixed, other, config))?;

    debug!(
        streams = others.len() + 1,
        outlet_c = outlet.temperature().get::<degree_celsius>(),
        "mixed streams"
    );

    Ok(MixingResult {
        mode: MixingMode::MultipleMixing,
        inlet_flow: *inlet,
        outlet_flow: outlet,
        heat_of_process: Power::new::<watt>(0.0),
        mixing_flows: others.to_vec(),
    })
}

/// Splits `bounds.total_flow` between an inlet and a recirculation branch so
/// the mixed stream reaches `target`.
///
/// Both streams keep their state and are rescaled to the branch flows. The
/// inlet branch flow is solved on
/// `[min_inlet_flow, total_flow − min_recirculation_flow]`; the result carries
/// the rescaled streams actually mixed.
///
/// # Errors
///
/// - [`ProcessError::OutOfBounds`] for a negative flow bound.
/// - [`ProcessError::InfeasibleConstraint`] if the minimum flows exceed the
///   total, or if no split within the bounds reaches `target`.
pub fn mixing_for_target_temperature(
    inlet: &FlowState,
    recirculation: &FlowState,
    bounds: &MixingBounds,
    target: ThermodynamicTemperature,
    config: &RootFinderConfig,
) -> Result<MixingResult, ProcessError> {
    let non_negative = |what: &'static str, flow: MassRate| {
        NonNegative::new(flow.get::<kilogram_per_second>())
            .map(|c| c.into_inner())
            .map_err(|e| ProcessError::out_of_bounds(what, e.to_string()))
    };
    let min_inlet = non_negative("minimum inlet flow", bounds.min_inlet_flow)?;
    let min_recirculation =
        non_negative("minimum recirculation flow", bounds.min_recirculation_flow)?;
    let total = non_negative("total flow", bounds.total_flow)?;

    let lower = min_inlet;
    let upper = total - min_recirculation;
    if lower > upper {
        return Err(ProcessError::infeasible(format!(
            "minimum flows {min_inlet} + {min_recirculation} kg/s exceed the total {total} kg/s"
        )));
    }

    let branches = |m_inlet: f64| -> Result<(FlowState, FlowState), ProcessError> {
        let m_recirculation = MassRate::new::<kilogram_per_second>((total - m_inlet).max(0.0));
        Ok((
            inlet.with_dry_air_mass_flow(MassRate::new::<kilogram_per_second>(m_inlet))?,
            recirculation.with_dry_air_mass_flow(m_recirculation)?,
        ))
    };
    let mixed_temperature = |m_inlet: f64| -> Result<f64, ProcessError> {
        let (a, b) = branches(m_inlet)?;
        let mixed = mix_pair(&a, &b, config)?;
        Ok(mixed.temperature().get::<degree_celsius>())
    };

    let t_target = target.get::<degree_celsius>();
    let t_lower = mixed_temperature(lower)?;
    let t_upper = mixed_temperature(upper)?;
    if t_target.is_nan() || t_target < t_lower.min(t_upper) || t_target > t_lower.max(t_upper) {
        return Err(ProcessError::infeasible(format!(
            "target {t_target} °C outside the reachable range [{}, {}] °C",
            t_lower.min(t_upper),
            t_lower.max(t_upper)
        )));
    }

    let m_inlet = find_root(
        |m: f64| Ok::<_, ProcessError>(mixed_temperature(m)? - t_target),
        lower,
        upper,
        config,
    )?;
    let (inlet_branch, recirculation_branch) = branches(m_inlet)?;
    let outlet = mix_pair(&inlet_branch, &recirculation_branch, config)?;

    debug!(
        inlet_kg_s = m_inlet,
        recirculation_kg_s = total - m_inlet,
        outlet_c = outlet.temperature().get::<degree_celsius>(),
        "mixing split for target temperature"
    );

    Ok(MixingResult {
        mode: MixingMode::FromTemperature,
        inlet_flow: inlet_branch,
        outlet_flow: outlet,
        heat_of_process: Power::new::<watt>(0.0),
        mixing_flows: vec![recirculation_branch],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, VolumeRate},
        ratio::percent,
        volume_rate::cubic_meter_per_hour,
    };

    use crate::support::psychrometrics;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn atmospheric(t: f64, rh: f64, volume_m3_h: f64) -> FlowState {
        FlowState::from_volume_flow_and_relative_humidity(
            celsius(t),
            Ratio::new::<percent>(rh),
            Pressure::new::<pascal>(101_325.0),
            VolumeRate::new::<cubic_meter_per_hour>(volume_m3_h),
        )
        .expect("flow should succeed")
    }

    #[test]
    fn outdoor_and_recirculated_air() {
        let p = Pressure::new::<pascal>(100_000.0);
        let m = MassRate::new::<kilogram_per_second>(5_000.0 / 3_600.0);
        let outdoor = FlowState::from_relative_humidity(
            celsius(-20.0),
            Ratio::new::<percent>(100.0),
            p,
            m,
        )
        .expect("flow should succeed");
        let recirculated = FlowState::from_relative_humidity(
            celsius(18.0),
            Ratio::new::<percent>(55.0),
            p,
            m,
        )
        .expect("flow should succeed");

        let result = mixing_of_two_flows(&outdoor, &recirculated, &RootFinderConfig::default())
            .expect("mixing should succeed");
        let outlet = result.outlet_flow;

        assert_eq!(result.mode, MixingMode::SimpleMixing);
        assert_relative_eq!(
            outlet.dry_air_mass_flow().get::<kilogram_per_second>(),
            10_000.0 / 3_600.0
        );
        let x_mean =
            0.5 * (outdoor.humidity_ratio() + recirculated.humidity_ratio()).get::<ratio>();
        assert_relative_eq!(
            outlet.humidity_ratio().get::<ratio>(),
            x_mean,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            outlet.humidity_ratio().get::<ratio>(),
            0.003_892_648,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            outlet.temperature().get::<degree_celsius>(),
            -0.370_927_6,
            epsilon = 1e-6
        );

        let i = psychrometrics::specific_enthalpy(outlet.temperature(), outlet.humidity_ratio(), p)
            .expect("enthalpy should succeed");
        let i_mean = 0.5 * (outdoor.specific_enthalpy() + recirculated.specific_enthalpy());
        assert_relative_eq!(
            i.get::<joule_per_kilogram>(),
            i_mean.get::<joule_per_kilogram>(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn three_winter_streams() {
        let first = atmospheric(-20.0, 99.0, 1_000.0);
        let others = [atmospheric(0.0, 80.0, 1_000.0), atmospheric(20.0, 50.0, 1_000.0)];

        let result = mixing_of_multiple_flows(&first, &others, &RootFinderConfig::default())
            .expect("mixing should succeed");
        let outlet = result.outlet_flow;

        assert_eq!(result.mode, MixingMode::MultipleMixing);
        assert_eq!(result.mixing_flows.len(), 2);
        assert_relative_eq!(
            outlet.temperature().get::<degree_celsius>(),
            -0.967_504_498,
            epsilon = 1e-8
        );
        assert_relative_eq!(
            outlet.relative_humidity().get::<percent>(),
            99.425_535_319,
            epsilon = 1e-7
        );
        assert_relative_eq!(
            outlet.humidity_ratio().get::<ratio>(),
            0.003_462_341_227,
            max_relative = 1e-9
        );

        // Close to the published −1.0 °C / 99.48 % reference, which uses a
        // slightly different saturation-pressure correlation.
        assert!((outlet.temperature().get::<degree_celsius>() + 1.0).abs() < 0.05);
        assert!((outlet.relative_humidity().get::<percent>() - 99.4834).abs() < 0.1);
    }

    #[test]
    fn nothing_to_mix_passes_the_inlet_through() {
        let inlet = atmospheric(20.0, 50.0, 1_000.0);
        let result = mixing_of_multiple_flows(&inlet, &[], &RootFinderConfig::default())
            .expect("mixing should succeed");
        assert_eq!(result.outlet_flow, inlet);
    }

    #[test]
    fn split_for_a_target_temperature() {
        let inlet = atmospheric(-20.0, 99.0, 2_000.0);
        let recirculation = atmospheric(20.0, 30.0, 1_000.0);
        let total = atmospheric(15.0, 40.0, 1_500.0).dry_air_mass_flow();
        let bounds = MixingBounds {
            min_inlet_flow: MassRate::new::<kilogram_per_second>(0.0),
            min_recirculation_flow: MassRate::new::<kilogram_per_second>(0.0),
            total_flow: total,
        };

        let result = mixing_for_target_temperature(
            &inlet,
            &recirculation,
            &bounds,
            celsius(15.0),
            &RootFinderConfig::default(),
        )
        .expect("mixing should succeed");

        let inlet_branch = result.inlet_flow.dry_air_mass_flow();
        let recirculation_branch = result.mixing_flows[0].dry_air_mass_flow();

        assert_eq!(result.mode, MixingMode::FromTemperature);
        assert!(inlet_branch < inlet.dry_air_mass_flow());
        assert!(recirculation_branch > recirculation.dry_air_mass_flow());
        assert_relative_eq!(
            inlet_branch.get::<kilogram_per_second>(),
            0.063_751_895,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            (inlet_branch + recirculation_branch).get::<kilogram_per_second>(),
            total.get::<kilogram_per_second>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.outlet_flow.temperature().get::<degree_celsius>(),
            15.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn unreachable_target_is_infeasible() {
        let inlet = atmospheric(-20.0, 99.0, 2_000.0);
        let recirculation = atmospheric(20.0, 30.0, 1_000.0);
        let total = MassRate::new::<kilogram_per_second>(0.5);
        let config = RootFinderConfig::default();

        let tight = MixingBounds {
            min_inlet_flow: MassRate::new::<kilogram_per_second>(0.25),
            min_recirculation_flow: MassRate::new::<kilogram_per_second>(0.0),
            total_flow: total,
        };
        assert!(matches!(
            mixing_for_target_temperature(&inlet, &recirculation, &tight, celsius(15.0), &config),
            Err(ProcessError::InfeasibleConstraint { .. })
        ));

        let overfull = MixingBounds {
            min_inlet_flow: MassRate::new::<kilogram_per_second>(0.3),
            min_recirculation_flow: MassRate::new::<kilogram_per_second>(0.3),
            total_flow: total,
        };
        assert!(matches!(
            mixing_for_target_temperature(&inlet, &recirculation, &overfull, celsius(0.0), &config),
            Err(ProcessError::InfeasibleConstraint { .. })
        ));
    }
}
