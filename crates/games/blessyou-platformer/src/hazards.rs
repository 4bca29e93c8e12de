use serde::{Deserialize, Serialize};

use crate::physics::Aabb;
use crate::tilemap::TileLayer;

/// Tileset index of the spike tile.
pub const HAZARD_INDEX: i32 = 11;
/// Hit-volume height of a spike lying flat. Only the points hurt.
pub const FLAT_HAZARD_HEIGHT: f32 = 10.0;

/// Orientation of a hazard, as rotated in the map editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    Flat,
    Quarter,
    Half,
    ThreeQuarter,
    /// Any other angle, in degrees within `[0, 360)`.
    Skewed(f32),
}

impl Rotation {
    /// Normalize an editor angle in degrees. Only non-finite angles yield
    /// `None`.
    pub fn from_degrees(degrees: f32) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let wrapped = degrees.rem_euclid(360.0);
        let quarter = (wrapped / 90.0).round();
        if (wrapped - quarter * 90.0).abs() > 0.01 {
            return Some(Self::Skewed(wrapped));
        }
        match quarter as i32 % 4 {
            0 => Some(Self::Flat),
            1 => Some(Self::Quarter),
            2 => Some(Self::Half),
            _ => Some(Self::ThreeQuarter),
        }
    }

    pub fn degrees(self) -> f32 {
        match self {
            Self::Flat => 0.0,
            Self::Quarter => 90.0,
            Self::Half => 180.0,
            Self::ThreeQuarter => 270.0,
            Self::Skewed(angle) => angle,
        }
    }
}

/// A spike converted from the tile layer into a standalone static body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    /// World-space center, taken from the source tile's center.
    pub x: f32,
    pub y: f32,
    pub rotation: Rotation,
    pub width: f32,
    pub height: f32,
}

impl Hazard {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }
}

/// Hit-volume size for a hazard built from a `tile_width` × `tile_height`
/// tile. A flat spike gets a thin slab; any other rotation keeps the
/// tile-sized default body.
pub fn hazard_body_size(rotation: Rotation, tile_width: f32, tile_height: f32) -> (f32, f32) {
    match rotation {
        Rotation::Flat => (tile_width, FLAT_HAZARD_HEIGHT),
        _ => (tile_width, tile_height),
    }
}

/// Replace every hazard tile in `layer` with a [`Hazard`] and clear the
/// source cell.
///
/// Runs in two passes (scan, then remove) so the layer is never mutated
/// while it is being read. Ids continue from `first_id`. A layer with no
/// hazard tiles, including one that was already extracted, yields nothing.
pub fn extract_hazards(layer: &mut TileLayer, first_id: u32) -> Vec<Hazard> {
    let candidates: Vec<(u32, u32, Rotation)> = layer
        .tiles
        .iter()
        .filter(|tile| tile.index == HAZARD_INDEX)
        .filter_map(|tile| match Rotation::from_degrees(tile.rotation) {
            Some(rotation) => Some((tile.x, tile.y, rotation)),
            None => {
                tracing::debug!(
                    layer = %layer.name,
                    x = tile.x,
                    y = tile.y,
                    angle = tile.rotation,
                    "Skipping hazard tile with non-finite rotation"
                );
                None
            },
        })
        .collect();

    let mut hazards = Vec::with_capacity(candidates.len());
    for (id, (x, y, rotation)) in (first_id..).zip(candidates) {
        let (cx, cy) = layer.tile_center(x, y);
        let (width, height) = hazard_body_size(rotation, layer.tile_width, layer.tile_height);
        hazards.push(Hazard {
            id,
            x: cx,
            y: cy,
            rotation,
            width,
            height,
        });
        layer.remove_tile_at(x, y);
    }

    hazards
}
