//! Cities as combatants

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, CivId};
use crate::map::hex::HexCoord;

pub const CITY_MAX_HEALTH: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub civ: CivId,
    pub center: HexCoord,
    pub health: u32,
    pub strength: u32,
    pub vision: u32,
}

impl City {
    pub fn new(name: impl Into<String>, civ: CivId, center: HexCoord) -> Self {
        Self {
            id: CityId::new(),
            name: name.into(),
            civ,
            center,
            health: CITY_MAX_HEALTH,
            strength: 12,
            vision: 2,
        }
    }

    pub fn max_health(&self) -> u32 {
        CITY_MAX_HEALTH
    }
}
