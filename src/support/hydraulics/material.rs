use uom::si::{
    f64::{Length, MassDensity, ThermalConductivity},
    length::millimeter,
    mass_density::kilogram_per_cubic_meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{Constrained, StrictlyPositive};

/// Conduit wall materials with tabulated properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    IndustrialSteel,
    Aluminium,
    Pvc,
    MineralWool,
    RubberFoam,
}

impl Material {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IndustrialSteel => "industrial steel",
            Self::Aluminium => "aluminium",
            Self::Pvc => "PVC",
            Self::MineralWool => "insulating mineral wool",
            Self::RubberFoam => "insulating rubber foam",
        }
    }

    #[must_use]
    pub fn density(self) -> MassDensity {
        let rho = match self {
            Self::IndustrialSteel => 7_850.0,
            Self::Aluminium => 2_700.0,
            Self::Pvc => 1_380.0,
            Self::MineralWool => 80.0,
            Self::RubberFoam => 100.0,
        };
        MassDensity::new::<kilogram_per_cubic_meter>(rho)
    }

    #[must_use]
    pub fn thermal_conductivity(self) -> ThermalConductivity {
        let k = match self {
            Self::IndustrialSteel => 54.0,
            Self::Aluminium => 205.0,
            Self::Pvc => 0.19,
            Self::MineralWool => 0.036,
            Self::RubberFoam => 0.035,
        };
        ThermalConductivity::new::<watt_per_meter_kelvin>(k)
    }

    /// Absolute roughness of the surface in contact with the flow.
    #[must_use]
    pub fn absolute_roughness(self) -> Length {
        let k = match self {
            Self::IndustrialSteel => 0.2,
            Self::Aluminium | Self::Pvc => 0.0015,
            Self::MineralWool => 1.0,
            Self::RubberFoam => 0.5,
        };
        Length::new::<millimeter>(k)
    }
}

/// A wall layer of a given material and thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialLayer {
    material: Material,
    thickness: Length,
}

impl MaterialLayer {
    #[must_use]
    pub fn new(material: Material, thickness: Constrained<Length, StrictlyPositive>) -> Self {
        Self {
            material,
            thickness: thickness.into_inner(),
        }
    }

    /// A 1 mm sheet of `material`.
    #[must_use]
    pub fn sheet(material: Material) -> Self {
        Self {
            material,
            thickness: Length::new::<millimeter>(1.0),
        }
    }

    #[must_use]
    pub fn material(&self) -> Material {
        self.material
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }
}
