//! Record of resolved attacks

use serde::{Deserialize, Serialize};

use crate::core::types::{CivId, Turn, UnitId};
use crate::map::hex::HexCoord;

/// What happened to the defender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    Damaged,
    Killed,
    CivilianCaptured,
    CityCaptured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatRecord {
    pub turn: Turn,
    pub attacker: UnitId,
    pub attacker_civ: CivId,
    pub attack_from: HexCoord,
    pub target: HexCoord,
    pub defender_civ: CivId,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub outcome: CombatOutcome,
}

/// Append-only list of combat records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatLog {
    records: Vec<CombatRecord>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CombatRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[CombatRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn for_turn(&self, turn: Turn) -> impl Iterator<Item = &CombatRecord> {
        self.records.iter().filter(move |r| r.turn == turn)
    }

    pub fn count_outcome(&self, outcome: CombatOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}
