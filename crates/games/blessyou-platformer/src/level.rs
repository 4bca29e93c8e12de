//! The built-in rooftop level.
//!
//! Three layers share one tileset and world offset: `background` (ledges
//! and windows), `ground` (floor and platforms), and `spike` (hazards, plus
//! a few purely decorative tiles).

use crate::hazards::HAZARD_INDEX;
use crate::tilemap::{Glyph, LevelError, TILE_SIZE, TileLayer, Tilemap, Tileset};

pub const BACKGROUND_LAYER: &str = "background";
pub const GROUND_LAYER: &str = "ground";
pub const SPIKE_LAYER: &str = "spike";

/// World position of every layer's top-left corner.
pub const LEVEL_OFFSET_X: f32 = 0.0;
pub const LEVEL_OFFSET_Y: f32 = -168.0;

const GROUND_INDEX: i32 = 1;
const LEDGE_INDEX: i32 = 5;
const WINDOW_INDEX: i32 = 20;
const VENT_INDEX: i32 = 12;

const BACKGROUND_ROWS: &[&str] = &[
    "................................",
    "................................",
    "..ww......ww......ww......ww....",
    "..ww......ww......ww......ww....",
    "................................",
    "................................",
    "..ww......ww......ww......ww....",
    "..ww......ww......ww......ww....",
    "............................xxx.",
    "................................",
    "..ww......ww......ww......ww....",
    "..ww......ww......ww......ww....",
    "................................",
    "................................",
    "..ww......ww......ww......ww....",
    "..ww......ww......ww......ww....",
    "................................",
    "................................",
    "..ww......ww......ww......ww....",
    "..ww..............ww......ww....",
    "................................",
    "................................",
    "................................",
    "................................",
];

const GROUND_ROWS: &[&str] = &[
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...................#####.......",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...........#####...............",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "#...............................",
    "################################",
    "################################",
];

const SPIKE_ROWS: &[&str] = &[
    "................................",
    "................................",
    "................................",
    "................................",
    "................................",
    "................................",
    "................................",
    "................................",
    "................................",
    ".............................v..",
    "................................",
    "....................^^^.........",
    "................................",
    "......................vv........",
    "................................",
    "................................",
    "................................",
    "..............vv................",
    "................................",
    ".>..............................",
    ".>.........o.................<..",
    ".>........^^^.......^^......o...",
    "................................",
    "................................",
];

/// Tileset shared by every layer.
pub fn tileset() -> Tileset {
    Tileset::new("bless-you-tileset", TILE_SIZE, TILE_SIZE)
        .with_collides(GROUND_INDEX)
        .with_collides(LEDGE_INDEX)
        .with_collides(HAZARD_INDEX)
}

fn glyph(index: i32, rotation: f32) -> Glyph {
    Glyph { index, rotation }
}

/// Build the three-layer level with hazards still in the spike layer.
pub fn build_level() -> Result<Tilemap, LevelError> {
    let tileset = tileset();

    let background = TileLayer::from_rows(
        BACKGROUND_LAYER,
        BACKGROUND_ROWS,
        &[('w', glyph(WINDOW_INDEX, 0.0)), ('x', glyph(LEDGE_INDEX, 0.0))],
        &tileset,
    )?
    .with_offset(LEVEL_OFFSET_X, LEVEL_OFFSET_Y);

    let ground = TileLayer::from_rows(
        GROUND_LAYER,
        GROUND_ROWS,
        &[('#', glyph(GROUND_INDEX, 0.0))],
        &tileset,
    )?
    .with_offset(LEVEL_OFFSET_X, LEVEL_OFFSET_Y);

    let spike = TileLayer::from_rows(
        SPIKE_LAYER,
        SPIKE_ROWS,
        &[
            ('^', glyph(HAZARD_INDEX, 0.0)),
            ('>', glyph(HAZARD_INDEX, 90.0)),
            ('v', glyph(HAZARD_INDEX, 180.0)),
            ('<', glyph(HAZARD_INDEX, 270.0)),
            ('o', glyph(VENT_INDEX, 0.0)),
        ],
        &tileset,
    )?
    .with_offset(LEVEL_OFFSET_X, LEVEL_OFFSET_Y);

    Ok(Tilemap {
        tileset,
        layers: vec![background, ground, spike],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_builds() {
        let map = build_level().unwrap();
        for name in [BACKGROUND_LAYER, GROUND_LAYER, SPIKE_LAYER] {
            let layer = map.layer(name).unwrap();
            assert_eq!((layer.width, layer.height), (32, 24), "layer {name}");
            assert_eq!((layer.offset_x, layer.offset_y), (0.0, -168.0));
        }
    }

    #[test]
    fn spike_layer_has_every_rotation() {
        let map = build_level().unwrap();
        let spike = map.layer(SPIKE_LAYER).unwrap();
        for angle in [0.0, 90.0, 180.0, 270.0] {
            assert!(
                spike
                    .tiles
                    .iter()
                    .any(|t| t.index == HAZARD_INDEX && t.rotation == angle),
                "missing spike at {angle} degrees"
            );
        }
    }

    #[test]
    fn floor_collides_windows_do_not() {
        let map = build_level().unwrap();
        assert!(map.layer(GROUND_LAYER).unwrap().is_solid(5, 22));
        let background = map.layer(BACKGROUND_LAYER).unwrap();
        assert!(!background.is_solid(2, 2), "windows are decoration");
        assert!(background.is_solid(28, 8), "ledges block");
    }

    #[test]
    fn spawn_column_is_clear_of_spikes() {
        let map = build_level().unwrap();
        let spike = map.layer(SPIKE_LAYER).unwrap();
        for y in 0..spike.height as i32 {
            for x in 3..=7 {
                assert!(spike.get_tile(x, y).is_none_or(|t| t.index != HAZARD_INDEX));
            }
        }
    }
}
