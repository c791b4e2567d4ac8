//! A single tile of the world map

use serde::{Deserialize, Serialize};

use crate::core::types::CityId;
use crate::map::hex::HexCoord;
use crate::map::terrain::{Terrain, TerrainFeature};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub features: Vec<TerrainFeature>,
    /// Set when a city is centered on this tile
    pub city: Option<CityId>,
}

impl Tile {
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            features: Vec::new(),
            city: None,
        }
    }

    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    pub fn is_land(&self) -> bool {
        self.terrain.is_land()
    }

    pub fn is_city_center(&self) -> bool {
        self.city.is_some()
    }

    pub fn has_feature(&self, feature: TerrainFeature) -> bool {
        self.features.contains(&feature)
    }

    /// Movement cost including features
    pub fn movement_cost(&self) -> f32 {
        let base = self.terrain.movement_cost();
        let features: f32 = self.features.iter().map(|f| f.movement_cost_modifier()).sum();
        base + features
    }

    pub fn blocks_los(&self) -> bool {
        self.terrain.blocks_los() || self.features.iter().any(|f| f.blocks_los())
    }

    /// Health lost per turn by a unit standing here
    pub fn damage_per_turn(&self) -> u32 {
        self.features.iter().map(|f| f.damage_per_turn()).sum()
    }

    /// Match a rules filter such as "Land", "Water", "City center", or a terrain/feature name
    pub fn matches_filter(&self, filter: &str) -> bool {
        match filter {
            "All" => true,
            "Land" => self.is_land(),
            "Water" => self.is_water(),
            "City center" | "City" => self.is_city_center(),
            _ => {
                self.terrain.name() == filter || self.features.iter().any(|f| f.name() == filter)
            }
        }
    }
}
