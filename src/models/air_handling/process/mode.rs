/// Kind of process a result or block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessType {
    Heating,
    Cooling,
    Mixing,
    PressureChange,
    ConduitFlow,
}

/// Which heating driver was given; the others were solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeatingMode {
    FromPower,
    FromTemperature,
    FromHumidity,
}

/// Which cooling driver was given; the others were solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoolingMode {
    FromPower,
    FromTemperature,
    FromHumidity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixingMode {
    /// One stream mixed into the main flow, or a pass-through.
    SimpleMixing,
    /// Two or more streams folded into the main flow.
    MultipleMixing,
    /// Two-stream split solved for a target outlet temperature.
    FromTemperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureMode {
    /// An explicit pressure drop dissipated as heat.
    PressureDrop,
    /// Friction and fitting losses along a conduit.
    ConduitFriction,
}
