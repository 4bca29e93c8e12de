use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tile index used for cells with no tile.
pub const EMPTY_INDEX: i32 = -1;

/// Tile size in world units for the built-in tileset.
pub const TILE_SIZE: f32 = 32.0;

/// One cell of a tile layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Tileset index, or [`EMPTY_INDEX`].
    pub index: i32,
    /// Column in the layer grid.
    pub x: u32,
    /// Row in the layer grid (row 0 is the top).
    pub y: u32,
    /// Rotation applied in the map editor, in degrees.
    pub rotation: f32,
    pub collides: bool,
}

impl Tile {
    pub fn is_empty(&self) -> bool {
        self.index == EMPTY_INDEX
    }
}

/// Per-index tile properties from the tileset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProperties {
    pub collides: bool,
}

/// Tileset metadata: tile dimensions and per-index properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    pub tile_width: f32,
    pub tile_height: f32,
    pub properties: HashMap<i32, TileProperties>,
}

impl Tileset {
    pub fn new(name: &str, tile_width: f32, tile_height: f32) -> Self {
        Self {
            name: name.to_string(),
            tile_width,
            tile_height,
            properties: HashMap::new(),
        }
    }

    /// Mark a tile index as colliding.
    pub fn with_collides(mut self, index: i32) -> Self {
        self.properties.insert(index, TileProperties { collides: true });
        self
    }

    pub fn collides(&self, index: i32) -> bool {
        self.properties.get(&index).is_some_and(|p| p.collides)
    }
}

/// How an ASCII glyph maps to a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub index: i32,
    pub rotation: f32,
}

/// Errors raised while building level data.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    EmptyLayer(String),
    RaggedRows {
        layer: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownGlyph {
        layer: String,
        glyph: char,
        x: usize,
        y: usize,
    },
    MissingLayer(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLayer(layer) => write!(f, "layer '{layer}' has no rows"),
            Self::RaggedRows {
                layer,
                row,
                expected,
                found,
            } => write!(
                f,
                "layer '{layer}' row {row} has {found} cells, expected {expected}"
            ),
            Self::UnknownGlyph { layer, glyph, x, y } => {
                write!(f, "layer '{layer}' has unknown glyph '{glyph}' at ({x}, {y})")
            },
            Self::MissingLayer(layer) => write!(f, "no layer named '{layer}'"),
        }
    }
}

impl std::error::Error for LevelError {}

/// A named grid of tiles placed in the world at an offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// World position of the layer's top-left corner.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Tile data stored row-major (y * width + x).
    pub tiles: Vec<Tile>,
}

impl TileLayer {
    /// Create a layer where every cell is empty.
    pub fn empty(name: &str, width: u32, height: u32, tileset: &Tileset) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile {
                    index: EMPTY_INDEX,
                    x,
                    y,
                    rotation: 0.0,
                    collides: false,
                });
            }
        }
        Self {
            name: name.to_string(),
            width,
            height,
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
            offset_x: 0.0,
            offset_y: 0.0,
            tiles,
        }
    }

    /// Build a layer from ASCII rows. `.` and space are empty cells; every
    /// other glyph must appear in `legend`.
    pub fn from_rows(
        name: &str,
        rows: &[&str],
        legend: &[(char, Glyph)],
        tileset: &Tileset,
    ) -> Result<Self, LevelError> {
        let Some(first) = rows.first() else {
            return Err(LevelError::EmptyLayer(name.to_string()));
        };
        let width = first.chars().count();
        let mut layer = Self::empty(name, width as u32, rows.len() as u32, tileset);

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRows {
                    layer: name.to_string(),
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '.' || ch == ' ' {
                    continue;
                }
                let Some((_, glyph)) = legend.iter().find(|(c, _)| *c == ch) else {
                    return Err(LevelError::UnknownGlyph {
                        layer: name.to_string(),
                        glyph: ch,
                        x,
                        y,
                    });
                };
                layer.put_tile(x as u32, y as u32, glyph.index, glyph.rotation);
            }
        }

        layer.set_collision_by_property(tileset);
        Ok(layer)
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.tiles.get(y as usize * self.width as usize + x as usize)
    }

    fn tile_mut(&mut self, x: u32, y: u32) -> Option<&mut Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get_mut(y as usize * self.width as usize + x as usize)
    }

    /// Place a tile. Collision is not updated; call
    /// [`TileLayer::set_collision_by_property`] afterwards.
    pub fn put_tile(&mut self, x: u32, y: u32, index: i32, rotation: f32) {
        if let Some(tile) = self.tile_mut(x, y) {
            tile.index = index;
            tile.rotation = rotation;
        }
    }

    /// Clear a cell: empty index, no rotation, no collision.
    pub fn remove_tile_at(&mut self, x: u32, y: u32) {
        if let Some(tile) = self.tile_mut(x, y) {
            tile.index = EMPTY_INDEX;
            tile.rotation = 0.0;
            tile.collides = false;
        }
    }

    /// Flag every non-empty tile whose index has the `collides` property.
    pub fn set_collision_by_property(&mut self, tileset: &Tileset) {
        for tile in &mut self.tiles {
            tile.collides = !tile.is_empty() && tileset.collides(tile.index);
        }
    }

    /// Whether the tile at grid (x, y) blocks movement.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.collides)
    }

    /// World-space center of the tile at grid (x, y).
    pub fn tile_center(&self, x: u32, y: u32) -> (f32, f32) {
        (
            self.offset_x + x as f32 * self.tile_width + self.tile_width / 2.0,
            self.offset_y + y as f32 * self.tile_height + self.tile_height / 2.0,
        )
    }

    /// Grid cell containing the world point, unclamped.
    pub fn world_to_tile(&self, wx: f32, wy: f32) -> (i32, i32) {
        (
            ((wx - self.offset_x) / self.tile_width).floor() as i32,
            ((wy - self.offset_y) / self.tile_height).floor() as i32,
        )
    }

    /// Count tiles with the given index.
    pub fn count_index(&self, index: i32) -> usize {
        self.tiles.iter().filter(|t| t.index == index).count()
    }

    /// World-space size of the layer.
    pub fn world_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.tile_width,
            self.height as f32 * self.tile_height,
        )
    }
}

/// A tile map: a tileset plus its named layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tilemap {
    pub tileset: Tileset,
    pub layers: Vec<TileLayer>,
}

impl Tilemap {
    pub fn layer(&self, name: &str) -> Result<&TileLayer, LevelError> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| LevelError::MissingLayer(name.to_string()))
    }

    pub fn layer_mut(&mut self, name: &str) -> Result<&mut TileLayer, LevelError> {
        self.layers
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| LevelError::MissingLayer(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset() -> Tileset {
        Tileset::new("test", 32.0, 32.0).with_collides(1)
    }

    fn legend() -> Vec<(char, Glyph)> {
        vec![
            (
                '#',
                Glyph {
                    index: 1,
                    rotation: 0.0,
                },
            ),
            (
                'o',
                Glyph {
                    index: 2,
                    rotation: 90.0,
                },
            ),
        ]
    }

    #[test]
    fn from_rows_places_tiles_and_collision() {
        let layer = TileLayer::from_rows("ground", &["..o", "###"], &legend(), &tileset()).unwrap();
        assert_eq!(layer.width, 3);
        assert_eq!(layer.height, 2);
        assert!(layer.get_tile(0, 0).unwrap().is_empty());

        let deco = layer.get_tile(2, 0).unwrap();
        assert_eq!(deco.index, 2);
        assert_eq!(deco.rotation, 90.0);
        assert!(!deco.collides, "index 2 has no collides property");

        assert!(layer.is_solid(0, 1));
        assert!(layer.is_solid(2, 1));
        assert!(!layer.is_solid(5, 5), "out of bounds is never solid");
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = TileLayer::from_rows("ground", &["###", "##"], &legend(), &tileset()).unwrap_err();
        assert_eq!(
            err,
            LevelError::RaggedRows {
                layer: "ground".to_string(),
                row: 1,
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn unknown_glyph_rejected() {
        let err = TileLayer::from_rows("ground", &["#?#"], &legend(), &tileset()).unwrap_err();
        assert!(matches!(err, LevelError::UnknownGlyph { glyph: '?', x: 1, y: 0, .. }));
        assert!(err.to_string().contains("unknown glyph"));
    }

    #[test]
    fn empty_layer_rejected() {
        let err = TileLayer::from_rows("ground", &[], &legend(), &tileset()).unwrap_err();
        assert_eq!(err, LevelError::EmptyLayer("ground".to_string()));
    }

    #[test]
    fn tile_center_includes_offset() {
        let layer = TileLayer::empty("spike", 10, 10, &tileset()).with_offset(0.0, -168.0);
        assert_eq!(layer.tile_center(3, 2), (112.0, -88.0));
        assert_eq!(layer.world_to_tile(112.0, -88.0), (3, 2));
    }

    #[test]
    fn remove_tile_clears_cell() {
        let mut layer = TileLayer::from_rows("ground", &["#"], &legend(), &tileset()).unwrap();
        layer.remove_tile_at(0, 0);
        let tile = layer.get_tile(0, 0).unwrap();
        assert!(tile.is_empty());
        assert!(!tile.collides);
        // Out of range removal is a no-op.
        layer.remove_tile_at(9, 9);
    }

    #[test]
    fn missing_layer_lookup_fails() {
        let map = Tilemap {
            tileset: tileset(),
            layers: vec![TileLayer::empty("ground", 1, 1, &tileset())],
        };
        assert!(map.layer("ground").is_ok());
        assert_eq!(
            map.layer("spike").unwrap_err(),
            LevelError::MissingLayer("spike".to_string())
        );
    }
}
