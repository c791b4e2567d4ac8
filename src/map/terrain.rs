//! Terrain types and their effects on movement, sight, and health

use serde::{Deserialize, Serialize};

/// Base terrain of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Grassland,
    Plains,
    Desert,
    Tundra,
    Hills,
    Mountain, // Impassable for everything but air
    Coast,
    Ocean,
}

impl Terrain {
    pub fn is_water(&self) -> bool {
        matches!(self, Terrain::Coast | Terrain::Ocean)
    }

    pub fn is_land(&self) -> bool {
        !self.is_water()
    }

    /// Movement points spent entering this terrain
    pub fn movement_cost(&self) -> f32 {
        match self {
            Terrain::Hills => 2.0,
            Terrain::Mountain => f32::INFINITY,
            _ => 1.0,
        }
    }

    /// Does this terrain hide what lies behind it?
    pub fn blocks_los(&self) -> bool {
        matches!(self, Terrain::Hills | Terrain::Mountain)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Terrain::Grassland => "Grassland",
            Terrain::Plains => "Plains",
            Terrain::Desert => "Desert",
            Terrain::Tundra => "Tundra",
            Terrain::Hills => "Hills",
            Terrain::Mountain => "Mountain",
            Terrain::Coast => "Coast",
            Terrain::Ocean => "Ocean",
        }
    }
}

/// Features layered on top of the base terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainFeature {
    Forest,
    Jungle,
    Marsh,
    Fallout,
}

impl TerrainFeature {
    /// Additional movement cost
    pub fn movement_cost_modifier(&self) -> f32 {
        match self {
            TerrainFeature::Forest | TerrainFeature::Jungle | TerrainFeature::Marsh => 1.0,
            TerrainFeature::Fallout => 1.0,
        }
    }

    pub fn blocks_los(&self) -> bool {
        matches!(self, TerrainFeature::Forest | TerrainFeature::Jungle)
    }

    /// Health lost by a unit ending its turn here
    pub fn damage_per_turn(&self) -> u32 {
        match self {
            TerrainFeature::Fallout => 15,
            _ => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainFeature::Forest => "Forest",
            TerrainFeature::Jungle => "Jungle",
            TerrainFeature::Marsh => "Marsh",
            TerrainFeature::Fallout => "Fallout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_classification() {
        assert!(Terrain::Coast.is_water());
        assert!(Terrain::Ocean.is_water());
        assert!(Terrain::Hills.is_land());
    }

    #[test]
    fn test_mountain_impassable() {
        assert!(Terrain::Mountain.movement_cost().is_infinite());
    }

    #[test]
    fn test_forest_blocks_los() {
        assert!(TerrainFeature::Forest.blocks_los());
        assert!(!TerrainFeature::Marsh.blocks_los());
    }

    #[test]
    fn test_only_fallout_damages() {
        assert!(TerrainFeature::Fallout.damage_per_turn() > 0);
        assert_eq!(TerrainFeature::Forest.damage_per_turn(), 0);
    }
}
