use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N2, P1, P2, Z0},
};

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Pressure loss per unit conduit length, Pa/m in SI.
pub type LinearPressureLoss = Quantity<ISQ<N2, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
