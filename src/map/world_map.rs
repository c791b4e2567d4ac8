//! World map with hex grid, terrain, and line of sight

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::map::hex::HexCoord;
use crate::map::terrain::{Terrain, TerrainFeature};
use crate::map::tile::Tile;

/// Rectangular (in axial space) hex map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMap {
    pub tiles: AHashMap<HexCoord, Tile>,
    pub width: u32,
    pub height: u32,
}

impl WorldMap {
    /// Create a new map filled with grassland
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = AHashMap::with_capacity((width * height) as usize);
        for q in 0..width as i32 {
            for r in 0..height as i32 {
                let coord = HexCoord::new(q, r);
                tiles.insert(coord, Tile::new(coord, Terrain::Grassland));
            }
        }
        Self {
            tiles,
            width,
            height,
        }
    }

    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.q >= 0 && coord.r >= 0 && coord.q < self.width as i32 && coord.r < self.height as i32
    }

    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) {
        if let Some(tile) = self.get_mut(coord) {
            tile.terrain = terrain;
        }
    }

    pub fn add_feature(&mut self, coord: HexCoord, feature: TerrainFeature) {
        if let Some(tile) = self.get_mut(coord) {
            if !tile.features.contains(&feature) {
                tile.features.push(feature);
            }
        }
    }

    /// Check line of sight between two tiles
    ///
    /// Intermediate tiles that block sight hide everything behind them; the
    /// blocking tile itself stays visible.
    pub fn has_line_of_sight(&self, from: HexCoord, to: HexCoord) -> bool {
        let line = from.line_to(&to);
        line.iter()
            .skip(1)
            .take(line.len().saturating_sub(2))
            .filter_map(|coord| self.get(*coord))
            .all(|tile| !tile.blocks_los())
    }

    /// All on-map tiles within `range`, regardless of sight
    pub fn tiles_in_distance(&self, center: HexCoord, range: u32) -> Vec<HexCoord> {
        center
            .within(range)
            .into_iter()
            .filter(|coord| self.in_bounds(*coord))
            .collect()
    }

    /// All on-map tiles within `range` that are in direct view of `center`
    pub fn viewable_tiles(&self, center: HexCoord, range: u32) -> Vec<HexCoord> {
        center
            .within(range)
            .into_iter()
            .filter(|coord| self.in_bounds(*coord) && self.has_line_of_sight(center, *coord))
            .collect()
    }
}
