//! Tile grid used for world collision.
//!
//! A [`TileMap`] is a dense, row-major grid of optional tile ids per named
//! layer, anchored at world origin. A [`Tileset`] decides which ids are solid.
//! The tile blocker samples a single layer, [`TileMap::collision_layer`].
//!
//! Maps can be built in code or loaded from the Tilesetter JSON export the
//! engine already reads for rendering, with two optional extra fields:
//!
//! ```json
//! {
//!   "tile_size": 16, "map_width": 40, "map_height": 30,
//!   "solid_tiles": [1, 2, 3],
//!   "collision_layer": "walls",
//!   "layers": [ { "name": "walls", "positions": [ { "x": 0, "y": 0, "id": 1 } ] } ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{debug, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Single tile placement within a layer.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tileposition {
    pub x: u32,
    pub y: u32,
    pub id: u32,
}

/// A named tile layer as stored on disk.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// On-disk tilemap description.
#[derive(Debug, Deserialize, Serialize)]
pub struct TilemapFile {
    /// Size of a (square) tile in world units.
    pub tile_size: u32,
    pub map_width: u32,
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
    #[serde(default)]
    pub solid_tiles: Vec<u32>,
    #[serde(default)]
    pub collision_layer: Option<String>,
}

/// Set of tile ids that block movement.
#[derive(Debug, Clone, Default)]
pub struct Tileset {
    solid: FxHashSet<u32>,
}

impl Tileset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_solid(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            solid: ids.into_iter().collect(),
        }
    }

    pub fn set_solid(&mut self, id: u32, solid: bool) {
        if solid {
            self.solid.insert(id);
        } else {
            self.solid.remove(&id);
        }
    }

    pub fn is_solid(&self, id: u32) -> bool {
        self.solid.contains(&id)
    }
}

#[derive(Debug, Clone)]
struct TileLayer {
    name: String,
    tiles: Vec<Option<u32>>,
}

#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub tileset: Tileset,
    /// Layer sampled by the tile blocker.
    pub collision_layer: usize,
    layers: Vec<TileLayer>,
}

impl TileMap {
    /// Create a map with no layers. Tile sizes must be finite and positive.
    pub fn new(width: u32, height: u32, tile_width: f32, tile_height: f32) -> Result<Self, String> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(tile_width) || !valid(tile_height) {
            return Err(format!(
                "Invalid tile size {}x{}: both sides must be finite and positive",
                tile_width, tile_height
            ));
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            tileset: Tileset::new(),
            collision_layer: 0,
            layers: Vec::new(),
        })
    }

    pub fn with_tileset(mut self, tileset: Tileset) -> Self {
        self.tileset = tileset;
        self
    }

    /// Append an empty layer and return its index.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(TileLayer {
            name: name.into(),
            tiles: vec![None; self.width as usize * self.height as usize],
        });
        self.layers.len() - 1
    }

    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn cell(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_valid_tile(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set or clear a tile. Out-of-range coordinates or layers are ignored.
    pub fn set_tile(&mut self, layer: usize, x: i32, y: i32, id: Option<u32>) {
        let Some(cell) = self.cell(x, y) else {
            return;
        };
        if let Some(layer) = self.layers.get_mut(layer) {
            layer.tiles[cell] = id;
        }
    }

    /// Fill a rectangle of tiles, clipped to the map.
    pub fn fill_rect(&mut self, layer: usize, x: i32, y: i32, w: i32, h: i32, id: Option<u32>) {
        for ty in y..y + h {
            for tx in x..x + w {
                self.set_tile(layer, tx, ty, id);
            }
        }
    }

    pub fn tile_at(&self, layer: usize, x: i32, y: i32) -> Option<u32> {
        let cell = self.cell(x, y)?;
        self.layers.get(layer)?.tiles[cell]
    }

    pub fn is_valid_tile(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Tile coordinates containing a world point.
    pub fn world_to_tile(&self, point: Vec2) -> (i32, i32) {
        (
            (point.x / self.tile_width).floor() as i32,
            (point.y / self.tile_height).floor() as i32,
        )
    }

    /// World position of a tile's top-left corner.
    pub fn tile_to_world(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * self.tile_width, y as f32 * self.tile_height)
    }

    /// Whether the collision layer blocks the given tile. Out of bounds is solid.
    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        if !self.is_valid_tile(x, y) {
            return true;
        }
        self.tile_at(self.collision_layer, x, y)
            .is_some_and(|id| self.tileset.is_solid(id))
    }

    /// World-space (min, max) of the whole map.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::ZERO,
            Vec2::new(
                self.width as f32 * self.tile_width,
                self.height as f32 * self.tile_height,
            ),
        )
    }

    /// Build a map from a parsed [`TilemapFile`].
    pub fn from_file_data(data: TilemapFile) -> Result<Self, String> {
        let size = data.tile_size as f32;
        let mut map = TileMap::new(data.map_width, data.map_height, size, size)?
            .with_tileset(Tileset::with_solid(data.solid_tiles));

        for layer in data.layers {
            let index = map.add_layer(layer.name);
            for pos in layer.positions {
                if !map.is_valid_tile(pos.x as i32, pos.y as i32) {
                    warn!(
                        "Tile ({}, {}) outside {}x{} map, skipped",
                        pos.x, pos.y, map.width, map.height
                    );
                    continue;
                }
                map.set_tile(index, pos.x as i32, pos.y as i32, Some(pos.id));
            }
        }

        if let Some(name) = data.collision_layer {
            map.collision_layer = map
                .layer_index(&name)
                .ok_or_else(|| format!("Collision layer '{}' not found in tilemap", name))?;
        }
        debug!(
            "Tilemap {}x{} ({} layers), collision layer {}",
            map.width,
            map.height,
            map.layers.len(),
            map.collision_layer
        );
        Ok(map)
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let data: TilemapFile =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse tilemap JSON: {}", e))?;
        Self::from_file_data(data)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tilemap {:?}: {}", path, e))?;
        Self::from_json_str(&json)
    }
}
