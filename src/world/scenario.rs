//! Scenario files: a map, civilizations, wars, cities, and units
//!
//! ```toml
//! name = "Skirmish"
//! width = 10
//! height = 8
//! wars = [[1, 2]]
//!
//! [[civs]]
//! id = 1
//! name = "Rome"
//!
//! [[terrain]]
//! terrain = "Coast"
//! area = { min = { q = 0, r = 0 }, max = { q = 1, r = 7 } }
//!
//! [[units]]
//! unit = "Warrior"
//! civ = 1
//! at = { q = 3, r = 3 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::{CombatConfig, TargetingConfig};
use crate::core::error::WarpathError;
use crate::core::types::CivId;
use crate::map::hex::HexCoord;
use crate::map::terrain::{Terrain, TerrainFeature};
use crate::rules::Ruleset;
use crate::world::state::GameState;

/// Errors that can occur when loading a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Unknown civilization: {0}")]
    UnknownCiv(u32),
    #[error("Unknown unit type: {0}")]
    UnknownUnit(String),
    #[error("Invalid scenario: {0}")]
    Invalid(String),
    #[error(transparent)]
    World(#[from] WarpathError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivEntry {
    pub id: u32,
    pub name: String,
}

/// Inclusive axial rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub min: HexCoord,
    pub max: HexCoord,
}

impl Area {
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> {
        let Area { min, max } = *self;
        (min.q..=max.q).flat_map(move |q| (min.r..=max.r).map(move |r| HexCoord::new(q, r)))
    }
}

/// Terrain override for a list of tiles and/or a rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPatch {
    #[serde(default)]
    pub terrain: Option<Terrain>,
    #[serde(default)]
    pub features: Vec<TerrainFeature>,
    #[serde(default)]
    pub tiles: Vec<HexCoord>,
    #[serde(default)]
    pub area: Option<Area>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityEntry {
    pub name: String,
    pub civ: u32,
    pub at: HexCoord,
    #[serde(default)]
    pub health: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Name of a unit definition in the ruleset
    pub unit: String,
    pub civ: u32,
    pub at: HexCoord,
    #[serde(default)]
    pub health: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub targeting: TargetingConfig,
    pub civs: Vec<CivEntry>,
    #[serde(default)]
    pub wars: Vec<[u32; 2]>,
    #[serde(default)]
    pub terrain: Vec<TerrainPatch>,
    #[serde(default)]
    pub cities: Vec<CityEntry>,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.combat.validate()?;
        scenario.targeting.validate()?;
        if scenario.width == 0 || scenario.height == 0 {
            return Err(ScenarioError::Invalid("map must be at least 1x1".into()));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn civ(&self, id: u32) -> Result<CivId, ScenarioError> {
        self.civs
            .iter()
            .any(|c| c.id == id)
            .then_some(CivId(id))
            .ok_or(ScenarioError::UnknownCiv(id))
    }

    /// Instantiate the world, spawning units from `rules`
    pub fn build(&self, rules: &Ruleset) -> Result<GameState, ScenarioError> {
        let mut state = GameState::with_config(
            self.width,
            self.height,
            self.combat.clone(),
            self.targeting.clone(),
        );

        for civ in &self.civs {
            state.add_civ(CivId(civ.id), civ.name.clone());
        }
        for [a, b] in &self.wars {
            state.diplomacy.declare_war(self.civ(*a)?, self.civ(*b)?);
        }

        for patch in &self.terrain {
            let coords = patch
                .tiles
                .iter()
                .copied()
                .chain(patch.area.iter().flat_map(Area::coords));
            for coord in coords {
                if !state.map.in_bounds(coord) {
                    return Err(WarpathError::TileNotFound(coord).into());
                }
                if let Some(terrain) = patch.terrain {
                    state.map.set_terrain(coord, terrain);
                }
                for feature in &patch.features {
                    state.map.add_feature(coord, *feature);
                }
            }
        }

        for entry in &self.cities {
            let id = state.found_city(entry.name.clone(), self.civ(entry.civ)?, entry.at)?;
            if let (Some(health), Some(city)) = (entry.health, state.cities.get_mut(&id)) {
                city.health = health.max(1);
            }
        }

        for entry in &self.units {
            let mut unit = rules
                .spawn(&entry.unit, self.civ(entry.civ)?, entry.at)
                .ok_or_else(|| ScenarioError::UnknownUnit(entry.unit.clone()))?;
            if let Some(health) = entry.health {
                unit.health = health.clamp(1, unit.health);
            }
            state.place_unit(unit)?;
        }

        tracing::info!(
            scenario = %self.name,
            civs = self.civs.len(),
            units = state.units.len(),
            cities = state.cities.len(),
            "scenario built"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin_ruleset;
    use crate::world::traits::WorldQuery;

    const SKIRMISH: &str = r#"
        name = "Skirmish"
        width = 8
        height = 6
        wars = [[1, 2]]

        [combat]
        seed = 9

        [[civs]]
        id = 1
        name = "Rome"

        [[civs]]
        id = 2
        name = "Carthage"

        [[terrain]]
        terrain = "Coast"
        area = { min = { q = 0, r = 0 }, max = { q = 0, r = 5 } }

        [[terrain]]
        features = ["Forest"]
        tiles = [{ q = 4, r = 2 }]

        [[cities]]
        name = "Carthage"
        civ = 2
        at = { q = 6, r = 3 }
        health = 40

        [[units]]
        unit = "Warrior"
        civ = 1
        at = { q = 2, r = 2 }

        [[units]]
        unit = "Archer"
        civ = 2
        at = { q = 5, r = 3 }
        health = 60
    "#;

    #[test]
    fn test_build_skirmish() {
        let scenario = Scenario::from_toml_str(SKIRMISH).unwrap();
        let state = scenario.build(&builtin_ruleset().unwrap()).unwrap();

        assert!(state.is_at_war(CivId(1), CivId(2)));
        assert!(state.map.get(HexCoord::new(0, 3)).unwrap().is_water());
        assert!(state.map.get(HexCoord::new(4, 2)).unwrap().has_feature(TerrainFeature::Forest));
        assert_eq!(state.units.len(), 2);
        assert_eq!(state.unit_at(HexCoord::new(5, 3)).unwrap().health, 60);
        assert_eq!(state.city_at(HexCoord::new(6, 3)).unwrap().health, 40);
    }

    #[test]
    fn test_unknown_civ_rejected() {
        let toml = SKIRMISH.replace("wars = [[1, 2]]", "wars = [[1, 7]]");
        let scenario = Scenario::from_toml_str(&toml).unwrap();
        assert!(matches!(
            scenario.build(&builtin_ruleset().unwrap()),
            Err(ScenarioError::UnknownCiv(7))
        ));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let toml = SKIRMISH.replace("unit = \"Warrior\"", "unit = \"Mech\"");
        let scenario = Scenario::from_toml_str(&toml).unwrap();
        assert!(matches!(
            scenario.build(&builtin_ruleset().unwrap()),
            Err(ScenarioError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let toml = SKIRMISH.replace("seed = 9", "seed = 9\ndamage_spread = 3.0");
        assert!(matches!(Scenario::from_toml_str(&toml), Err(ScenarioError::World(_))));
    }
}
