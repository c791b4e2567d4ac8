//! Combat class and movement domain of a unit

use serde::{Deserialize, Serialize};

/// How a unit fights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    Melee,    // Closes to adjacent tiles, advances after kills, captures
    Ranged,   // Fires from a distance, takes no retaliation
    Civilian, // Cannot attack, captured by melee units
}

/// Where a unit moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitDomain {
    Land,
    Water,
    Air,
}

impl UnitClass {
    pub fn is_melee(&self) -> bool {
        matches!(self, UnitClass::Melee)
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, UnitClass::Ranged)
    }

    pub fn is_civilian(&self) -> bool {
        matches!(self, UnitClass::Civilian)
    }
}

impl UnitDomain {
    /// Air units strike from where they stand and ignore sight lines
    pub fn moves_like_air(&self) -> bool {
        matches!(self, UnitDomain::Air)
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitDomain::Land => "Land",
            UnitDomain::Water => "Water",
            UnitDomain::Air => "Air",
        }
    }
}
