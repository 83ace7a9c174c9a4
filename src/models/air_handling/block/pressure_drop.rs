use tracing::debug;
use uom::si::{f64::Pressure, power::watt, pressure::pascal};

use crate::{
    models::air_handling::{
        FlowState, ProcessError,
        process::{ProcessResult, ProcessType, pressure_drop_due_to_friction},
    },
    support::constraint::{Constrained, NonNegative},
};

use super::{Connector, ProcessBlock};

/// A fixed pressure drop, such as a filter or a damper.
#[derive(Debug)]
pub struct PressureDropBlock {
    inlet: Connector<FlowState>,
    outlet: Connector<FlowState>,
    pressure_drop: Pressure,
    result: Option<ProcessResult>,
}

impl PressureDropBlock {
    #[must_use]
    pub fn new(pressure_drop: Constrained<Pressure, NonNegative>) -> Self {
        Self {
            inlet: Connector::new(),
            outlet: Connector::new(),
            pressure_drop: pressure_drop.into_inner(),
            result: None,
        }
    }

    #[must_use]
    pub fn pressure_drop(&self) -> Pressure {
        self.pressure_drop
    }
}

impl ProcessBlock for PressureDropBlock {
    fn process_type(&self) -> ProcessType {
        ProcessType::PressureChange
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

    fn run_process_calculations(&mut self) -> Result<ProcessResult, ProcessError> {
        self.result = None;
        self.outlet.clear();

        let inlet = self.inlet.require("pressure drop inlet flow")?;
        let result = pressure_drop_due_to_friction(inlet, self.pressure_drop)?;

        debug!(
            dp_pa = self.pressure_drop.get::<pascal>(),
            heat_w = result.heat_of_process.get::<watt>(),
            "pressure drop block"
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

    use uom::si::{
        f64::{Ratio, ThermodynamicTemperature, VolumeRate},
        ratio::ratio,
        thermodynamic_temperature::degree_celsius,
        volume_rate::cubic_meter_per_second,
    };

    #[test]
    fn filter_drop_heats_the_stream() {
        let inlet = FlowState::from_volume_flow(
            ThermodynamicTemperature::new::<degree_celsius>(25.0),
            Ratio::new::<ratio>(0.01),
            Pressure::new::<pascal>(101_325.0),
            VolumeRate::new::<cubic_meter_per_second>(1.5),
        )
        .expect("flow should succeed");
        let dp = NonNegative::new(Pressure::new::<pascal>(300.0)).expect("drop should succeed");
        let mut block = PressureDropBlock::new(dp);
        block
            .input_connector_mut()
            .set(inlet)
            .expect("set should succeed");

        let result = block
            .run_process_calculations()
            .expect("pressure drop should succeed");

        assert_eq!(result.process_type(), ProcessType::PressureChange);
        assert!((result.heat_of_process().get::<watt>() - 450.0).abs() < 1e-9);
        assert_eq!(block.output_connector().value(), Some(result.outlet_flow()));
    }
}
