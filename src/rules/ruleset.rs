//! Unit definitions and spawning

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::CivId;
use crate::map::hex::HexCoord;
use crate::units::unit::MapUnit;
use crate::units::unit_type::{UnitClass, UnitDomain};
use crate::units::uniques::Unique;

fn default_movement() -> f32 {
    2.0
}

fn default_vision() -> u32 {
    2
}

/// Static description of a unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    pub class: UnitClass,
    pub domain: UnitDomain,
    #[serde(default = "default_movement")]
    pub movement: f32,
    pub strength: u32,
    #[serde(default)]
    pub ranged_strength: u32,
    /// Attack range; melee units always use 1
    #[serde(default)]
    pub range: Option<u32>,
    #[serde(default = "default_vision")]
    pub vision: u32,
    #[serde(default)]
    pub uniques: Vec<Unique>,
}

impl UnitDefinition {
    /// Build a fresh unit of this type
    pub fn instantiate(&self, civ: CivId, position: HexCoord) -> MapUnit {
        let mut unit = MapUnit::new(self.name.clone(), civ, self.class, self.domain).at(position);
        unit.max_movement = self.movement;
        unit.current_movement = self.movement;
        unit.strength = self.strength;
        unit.ranged_strength = self.ranged_strength;
        if let Some(range) = self.range {
            unit.range = range;
        }
        unit.vision = self.vision;
        for unique in &self.uniques {
            unit.uniques.insert(unique.clone());
        }
        unit
    }
}

/// Catalog of unit definitions keyed by name
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    units: AHashMap<String, UnitDefinition>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: UnitDefinition) {
        self.units.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Create a unit of the named type, or None if the name is unknown
    pub fn spawn(&self, name: &str, civ: CivId, position: HexCoord) -> Option<MapUnit> {
        self.get(name).map(|def| def.instantiate(civ, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::uniques::UniqueType;

    fn catapult() -> UnitDefinition {
        UnitDefinition {
            name: "Catapult".into(),
            class: UnitClass::Ranged,
            domain: UnitDomain::Land,
            movement: 2.0,
            strength: 4,
            ranged_strength: 14,
            range: None,
            vision: 2,
            uniques: vec![Unique::new(UniqueType::MustSetUp)],
        }
    }

    #[test]
    fn test_spawn_copies_definition() {
        let mut rules = Ruleset::new();
        rules.insert(catapult());
        let unit = rules.spawn("Catapult", CivId(3), HexCoord::new(1, 2)).unwrap();
        assert_eq!(unit.civ, CivId(3));
        assert_eq!(unit.position, HexCoord::new(1, 2));
        assert_eq!(unit.ranged_strength, 14);
        assert_eq!(unit.range, 2);
        assert!(unit.has_unique(UniqueType::MustSetUp));
    }

    #[test]
    fn test_spawned_units_get_distinct_ids() {
        let mut rules = Ruleset::new();
        rules.insert(catapult());
        let a = rules.spawn("Catapult", CivId(1), HexCoord::new(0, 0)).unwrap();
        let b = rules.spawn("Catapult", CivId(1), HexCoord::new(0, 0)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unknown_unit() {
        assert!(Ruleset::new().spawn("Mech", CivId(1), HexCoord::new(0, 0)).is_none());
    }
}
