//! Units on the world map

use serde::{Deserialize, Serialize};

use crate::core::types::{CivId, UnitId};
use crate::map::hex::HexCoord;
use crate::units::unit_type::{UnitClass, UnitDomain};
use crate::units::uniques::{Unique, UniqueSet, UniqueType};

pub const MAX_HEALTH: u32 = 100;

/// A unit owned by a civilization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapUnit {
    pub id: UnitId,
    pub name: String,
    pub civ: CivId,
    pub class: UnitClass,
    pub domain: UnitDomain,

    // Position
    pub position: HexCoord,

    // Movement budget, spent fractionally
    pub max_movement: f32,
    pub current_movement: f32,

    // Combat
    pub health: u32,
    pub strength: u32,
    pub ranged_strength: u32,
    pub range: u32,
    pub vision: u32,

    // State
    pub embarked: bool,
    pub set_up_for_siege: bool,

    pub uniques: UniqueSet,
}

impl MapUnit {
    pub fn new(name: impl Into<String>, civ: CivId, class: UnitClass, domain: UnitDomain) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            civ,
            class,
            domain,
            position: HexCoord::default(),
            max_movement: 2.0,
            current_movement: 2.0,
            health: MAX_HEALTH,
            strength: 10,
            ranged_strength: if class.is_ranged() { 10 } else { 0 },
            range: if class.is_ranged() { 2 } else { 1 },
            vision: 2,
            embarked: false,
            set_up_for_siege: false,
            uniques: UniqueSet::new(),
        }
    }

    /// Builder-style modifier attachment
    pub fn with_unique(mut self, unique: Unique) -> Self {
        self.uniques.insert(unique);
        self
    }

    pub fn at(mut self, position: HexCoord) -> Self {
        self.position = position;
        self
    }

    pub fn has_unique(&self, kind: UniqueType) -> bool {
        self.uniques.has(kind)
    }

    pub fn is_melee(&self) -> bool {
        self.class.is_melee()
    }

    pub fn is_ranged(&self) -> bool {
        self.class.is_ranged()
    }

    pub fn is_civilian(&self) -> bool {
        self.class.is_civilian()
    }

    pub fn is_military(&self) -> bool {
        !self.is_civilian()
    }

    pub fn is_land_unit(&self) -> bool {
        self.domain == UnitDomain::Land
    }

    pub fn is_water_unit(&self) -> bool {
        self.domain == UnitDomain::Water
    }

    pub fn moves_like_air_units(&self) -> bool {
        self.domain.moves_like_air()
    }

    pub fn is_embarked(&self) -> bool {
        self.embarked
    }

    pub fn is_invisible(&self) -> bool {
        self.has_unique(UniqueType::Invisible)
    }

    pub fn can_attack(&self) -> bool {
        self.is_military() && !self.has_unique(UniqueType::CannotAttack)
    }

    pub fn has_movement_left(&self) -> bool {
        self.current_movement > 0.0
    }

    pub fn is_wounded(&self) -> bool {
        self.health < MAX_HEALTH
    }

    pub fn restore_movement(&mut self) {
        self.current_movement = self.max_movement;
    }

    /// Match a rules category such as "Land", "Military", "Wounded", or the unit's name
    pub fn matches_filter(&self, filter: &str) -> bool {
        match filter {
            "All" => true,
            "Land" | "Water" | "Air" => self.domain.name() == filter,
            "Military" => self.is_military(),
            "Civilian" => self.is_civilian(),
            "Melee" => self.is_melee(),
            "Ranged" => self.is_ranged(),
            "Wounded" => self.is_wounded(),
            "Embarked" => self.embarked,
            _ => self.name == filter,
        }
    }
}
