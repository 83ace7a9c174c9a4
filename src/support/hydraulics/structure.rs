use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    f64::{Area, Length, LinearMassDensity},
    length::meter,
    linear_mass_density::kilogram_per_meter,
    mass_density::kilogram_per_cubic_meter,
};

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::MaterialLayer;

/// Inner cross-section of a conduit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConduitShape {
    Circular { inner_diameter: Length },
    Rectangular { width: Length, height: Length },
}

/// A straight conduit: inner cross-section plus the wall layer the flow touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConduitStructure {
    shape: ConduitShape,
    wall: MaterialLayer,
}

impl ConduitStructure {
    #[must_use]
    pub fn circular(
        inner_diameter: Constrained<Length, StrictlyPositive>,
        wall: MaterialLayer,
    ) -> Self {
        Self {
            shape: ConduitShape::Circular {
                inner_diameter: inner_diameter.into_inner(),
            },
            wall,
        }
    }

    #[must_use]
    pub fn rectangular(
        width: Constrained<Length, StrictlyPositive>,
        height: Constrained<Length, StrictlyPositive>,
        wall: MaterialLayer,
    ) -> Self {
        Self {
            shape: ConduitShape::Rectangular {
                width: width.into_inner(),
                height: height.into_inner(),
            },
            wall,
        }
    }

    #[must_use]
    pub fn shape(&self) -> ConduitShape {
        self.shape
    }

    #[must_use]
    pub fn wall(&self) -> MaterialLayer {
        self.wall
    }

    /// Inner cross-section area.
    #[must_use]
    pub fn area(&self) -> Area {
        let a = match self.shape {
            ConduitShape::Circular { inner_diameter } => {
                let d = inner_diameter.get::<meter>();
                PI * d * d / 4.0
            }
            ConduitShape::Rectangular { width, height } => {
                width.get::<meter>() * height.get::<meter>()
            }
        };
        Area::new::<square_meter>(a)
    }

    /// Inner (wetted) perimeter.
    #[must_use]
    pub fn perimeter(&self) -> Length {
        let p = match self.shape {
            ConduitShape::Circular { inner_diameter } => PI * inner_diameter.get::<meter>(),
            ConduitShape::Rectangular { width, height } => {
                2.0 * (width.get::<meter>() + height.get::<meter>())
            }
        };
        Length::new::<meter>(p)
    }

    /// Equivalent hydraulic diameter, `4A/P`.
    #[must_use]
    pub fn hydraulic_diameter(&self) -> Length {
        let area = self.area().get::<square_meter>();
        Length::new::<meter>(4.0 * area / self.perimeter().get::<meter>())
    }

    #[must_use]
    pub fn absolute_roughness(&self) -> Length {
        self.wall.material().absolute_roughness()
    }

    /// Mass of the wall layer per metre of conduit.
    #[must_use]
    pub fn wall_mass_per_length(&self) -> LinearMassDensity {
        let t = self.wall.thickness().get::<meter>();
        let section = match self.shape {
            ConduitShape::Circular { inner_diameter } => {
                let d = inner_diameter.get::<meter>();
                PI / 4.0 * ((d + 2.0 * t).powi(2) - d * d)
            }
            ConduitShape::Rectangular { width, height } => {
                let (w, h) = (width.get::<meter>(), height.get::<meter>());
                (w + 2.0 * t) * (h + 2.0 * t) - w * h
            }
        };
        let rho = self.wall
            .material()
            .density()
            .get::<kilogram_per_cubic_meter>();
        LinearMassDensity::new::<kilogram_per_meter>(section * rho)
    }
}
