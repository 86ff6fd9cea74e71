//! Houses and their furniture anchors.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use paradise_types::{FurnitureKind, HouseId};
use serde::Serialize;

/// Furniture anchor points inside one house. Immutable after generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Furniture {
    /// Parent bed, then child bed.
    pub beds: [Vec3; 2],
    /// Couch seat.
    pub couch: Vec3,
    /// Couch facing.
    pub couch_yaw: f32,
    /// Television.
    pub tv: Vec3,
    /// Television facing.
    pub tv_yaw: f32,
    /// Back corner of the room.
    pub corner: Vec3,
}

impl Furniture {
    /// Furnish a 10x10 house centred on `centre`.
    pub fn around(centre: Vec3) -> Self {
        Self {
            beds: [
                centre + Vec3::new(-3.0, 1.0, -3.0),
                centre + Vec3::new(3.0, 1.0, -3.0),
            ],
            couch: centre + Vec3::new(3.5, 1.0, 0.0),
            couch_yaw: -FRAC_PI_2,
            tv: centre + Vec3::new(-4.2, 1.0, 0.0),
            tv_yaw: FRAC_PI_2,
            corner: centre + Vec3::new(-4.0, 0.0, -4.0),
        }
    }

    /// Bed by index. Anything past the second bed falls back to the first.
    pub const fn bed(&self, index: usize) -> Vec3 {
        let [first, second] = self.beds;
        if index == 1 { second } else { first }
    }

    /// Where someone sits on the couch: half a unit along its back,
    /// turned with the couch.
    pub fn couch_seat(&self) -> Vec3 {
        let offset = Quat::from_rotation_y(self.couch_yaw).mul_vec3(Vec3::new(-0.5, 0.0, 0.0));
        self.couch + offset
    }

    /// Position of a furniture anchor.
    pub const fn anchor(&self, kind: FurnitureKind) -> Vec3 {
        match kind {
            FurnitureKind::Bed => self.bed(0),
            FurnitureKind::Couch => self.couch,
            FurnitureKind::Tv => self.tv,
            FurnitureKind::Corner => self.corner,
        }
    }
}

/// A house on the town grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct House {
    /// House identifier.
    pub id: HouseId,
    /// Centre of the house at ground level.
    pub position: Vec3,
    /// Wall colour, also worn by the household's child.
    pub color: String,
    /// Furniture anchors.
    pub furniture: Furniture,
}

impl House {
    /// Build and furnish a house.
    pub fn new(id: HouseId, position: Vec3, color: impl Into<String>) -> Self {
        Self {
            id,
            position,
            color: color.into(),
            furniture: Furniture::around(position),
        }
    }
}
