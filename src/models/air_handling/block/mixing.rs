use tracing::debug;
use uom::si::{f64::Pressure, pressure::pascal, thermodynamic_temperature::degree_celsius};

use crate::{
    models::air_handling::{
        FlowState, ProcessError,
        process::{
            MixingMode, MixingResult, ProcessResult, ProcessType, mixing_of_multiple_flows,
            mixing_of_two_flows, pressure_drop_due_to_friction,
        },
    },
    support::{
        constraint::{Constrained, NonNegative},
        root_finder::RootFinderConfig,
    },
};

use super::{Connector, ProcessBlock};

/// Mixes any number of streams into the main flow.
///
/// The block's own pressure loss is applied to the mixed stream, and the
/// dissipated flow work is reported as the heat of the process.
#[derive(Debug)]
pub struct MixingBlock {
    inlet: Connector<FlowState>,
    mixing: Vec<Connector<FlowState>>,
    outlet: Connector<FlowState>,
    pressure_loss: Pressure,
    config: RootFinderConfig,
    result: Option<ProcessResult>,
}

impl Default for MixingBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl MixingBlock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inlet: Connector::new(),
            mixing: Vec::new(),
            outlet: Connector::new(),
            pressure_loss: Pressure::new::<pascal>(0.0),
            config: RootFinderConfig::default(),
            result: None,
        }
    }

    #[must_use]
    pub fn with_pressure_loss(mut self, loss: Constrained<Pressure, NonNegative>) -> Self {
        self.pressure_loss = loss.into_inner();
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RootFinderConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds an empty mixing port and returns its index.
    pub fn add_mixing_connector(&mut self) -> usize {
        self.mixing.push(Connector::new());
        self.mixing.len() - 1
    }

    /// Adds a mixing port holding `flow` and returns its index.
    pub fn add_mixing_flow(&mut self, flow: FlowState) -> usize {
        self.mixing.push(Connector::with_value(flow));
        self.mixing.len() - 1
    }

    #[must_use]
    pub fn mixing_connectors(&self) -> &[Connector<FlowState>] {
        &self.mixing
    }

    pub fn mixing_connector_mut(&mut self, index: usize) -> Option<&mut Connector<FlowState>> {
        self.mixing.get_mut(index)
    }

    fn mix(&self, inlet: &FlowState) -> Result<MixingResult, ProcessError> {
        let streams = self
            .mixing
            .iter()
            .enumerate()
            .map(|(i, c)| c.require(&format!("mixing flow {i}")).copied())
            .collect::<Result<Vec<_>, _>>()?;

        match streams.as_slice() {
            [] => Ok(MixingResult {
                mode: MixingMode::SimpleMixing,
                ..mixing_of_multiple_flows(inlet, &[], &self.config)?
            }),
            [other] => mixing_of_two_flows(inlet, other, &self.config),
            others => mixing_of_multiple_flows(inlet, others, &self.config),
        }
    }
}

impl ProcessBlock for MixingBlock {
    fn process_type(&self) -> ProcessType {
        ProcessType::Mixing
    }

    fn input_connector(&self) -> &Connector<FlowState> {
        &self.inlet
    }

    fn input_connector_mut(&mut self) -> &mut Connector<FlowState> {
        &mut self.inlet
    }

    fn output_connector(&self) -> &Connector<FlowState> {
        &self.outlet
    }

    fn auxiliary_flow_connectors_mut(&mut self) -> Vec<&mut Connector<FlowState>> {
        self.mixing.iter_mut().collect()
    }

    fn run_process_calculations(&mut self) -> Result<ProcessResult, ProcessError> {
        self.result = None;
        self.outlet.clear();

        let inlet = *self.inlet.require("mixing inlet flow")?;
        let mut result = self.mix(&inlet)?;

        let friction = pressure_drop_due_to_friction(&result.outlet_flow, self.pressure_loss)?;
        result.outlet_flow = friction.outlet_flow;
        result.heat_of_process = friction.heat_of_process;

        debug!(
            mode = ?result.mode,
            streams = result.mixing_flows.len() + 1,
            outlet_c = result.outlet_flow.temperature().get::<degree_celsius>(),
            "mixing block"
        );

        self.outlet.refresh(result.outlet_flow);
        let result = ProcessResult::from(result);
        self.result = Some(result.clone());
        Ok(result)
    }

    fn process_result(&self) -> Option<&ProcessResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Ratio, ThermodynamicTemperature, VolumeRate},
        mass_rate::kilogram_per_second,
        power::watt,
        ratio::percent,
        volume_rate::cubic_meter_per_hour,
    };

    fn air(t: f64, rh: f64) -> FlowState {
        FlowState::from_volume_flow_and_relative_humidity(
            ThermodynamicTemperature::new::<degree_celsius>(t),
            Ratio::new::<percent>(rh),
            Pressure::new::<pascal>(101_325.0),
            VolumeRate::new::<cubic_meter_per_hour>(1_000.0),
        )
        .expect("flow should succeed")
    }

    fn mode_of(result: &ProcessResult) -> MixingMode {
        match result {
            ProcessResult::Mixing(mixing) => mixing.mode,
            other => panic!("expected a mixing result, got {other:?}"),
        }
    }

    #[test]
    fn mode_follows_the_number_of_streams() {
        let mut block = MixingBlock::new();
        block
            .input_connector_mut()
            .set(air(20.0, 50.0))
            .expect("set should succeed");

        let alone = block
            .run_process_calculations()
            .expect("mixing should succeed");
        assert_eq!(mode_of(&alone), MixingMode::SimpleMixing);
        assert_eq!(alone.outlet_flow(), alone.inlet_flow());

        block.add_mixing_flow(air(0.0, 80.0));
        let pair = block
            .run_process_calculations()
            .expect("mixing should succeed");
        assert_eq!(mode_of(&pair), MixingMode::SimpleMixing);

        block.add_mixing_flow(air(-20.0, 99.0));
        let three = block
            .run_process_calculations()
            .expect("mixing should succeed");
        assert_eq!(mode_of(&three), MixingMode::MultipleMixing);

        let total: f64 = [air(20.0, 50.0), air(0.0, 80.0), air(-20.0, 99.0)]
            .iter()
            .map(|f| f.dry_air_mass_flow().get::<kilogram_per_second>())
            .sum();
        let mixed_flow = three.outlet_flow().dry_air_mass_flow();
        assert_relative_eq!(
            mixed_flow.get::<kilogram_per_second>(),
            total,
            max_relative = 1e-12
        );
    }

    #[test]
    fn pressure_loss_is_applied_after_mixing() {
        let loss = NonNegative::new(Pressure::new::<pascal>(50.0)).expect("loss should succeed");
        let mut block = MixingBlock::new().with_pressure_loss(loss);
        block
            .input_connector_mut()
            .set(air(30.0, 40.0))
            .expect("set should succeed");
        block.add_mixing_flow(air(10.0, 70.0));

        let result = block
            .run_process_calculations()
            .expect("mixing should succeed");
        let mixed = mixing_of_two_flows(
            &air(30.0, 40.0),
            &air(10.0, 70.0),
            &RootFinderConfig::default(),
        )
        .expect("mixing should succeed");

        assert_relative_eq!(
            result.outlet_flow().pressure().get::<pascal>(),
            101_325.0 - 50.0,
            max_relative = 1e-12
        );
        assert!(result.outlet_flow().temperature() > mixed.outlet_flow.temperature());
        assert_relative_eq!(
            result.heat_of_process().get::<watt>(),
            mixed.outlet_flow.volume_flow().value * 50.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn empty_mixing_port_is_missing() {
        let mut block = MixingBlock::new();
        block
            .input_connector_mut()
            .set(air(20.0, 50.0))
            .expect("set should succeed");
        block.add_mixing_connector();

        assert!(matches!(
            block.run_process_calculations(),
            Err(ProcessError::MissingArgument { .. })
        ));
    }
}
