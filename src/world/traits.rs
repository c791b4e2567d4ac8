//! Seams between the targeting engine and the world it reasons about
//!
//! The engine only ever sees the world through these traits, so it can be
//! driven by `GameState` or by any synthetic world in tests.

use ahash::AHashSet;

use crate::automation::attackable::AttackOption;
use crate::combat::combatant::Combatant;
use crate::core::error::Result;
use crate::core::types::{CivId, UnitId};
use crate::map::hex::HexCoord;
use crate::map::tile::Tile;
use crate::units::unit::MapUnit;
use crate::world::pathfinding::ReachableTiles;

/// Read-only world state: terrain, occupancy, diplomacy, sight
pub trait WorldQuery {
    fn tile(&self, coord: HexCoord) -> Option<&Tile>;

    /// The combatant a strike on this tile would hit: the city on a city
    /// center, otherwise the unit standing there
    fn combatant_at(&self, coord: HexCoord) -> Option<Combatant<'_>>;

    fn is_at_war(&self, a: CivId, b: CivId) -> bool;

    /// Tiles currently seen by any unit or city of `civ`
    fn visible_tiles(&self, civ: CivId) -> AHashSet<HexCoord>;

    /// Tiles where `civ` can see invisible units
    fn revealed_invisible_tiles(&self, civ: CivId) -> AHashSet<HexCoord>;

    fn tiles_in_distance(&self, center: HexCoord, range: u32) -> Vec<HexCoord>;

    /// Tiles within range that are in direct view of `center`
    fn viewable_tiles(&self, center: HexCoord, range: u32) -> Vec<HexCoord>;
}

/// Movement rules for a unit this turn
pub trait UnitMovement {
    fn reachable_tiles(&self, unit: &MapUnit) -> ReachableTiles;

    /// May the unit end its move on this tile?
    fn can_move_to(&self, unit: &MapUnit, tile: HexCoord) -> bool;

    /// May the unit path over this tile?
    fn can_pass_through(&self, unit: &MapUnit, tile: HexCoord) -> bool;
}

/// Combat predictions, treated as a black box by the targeting engine
pub trait DamageModel {
    fn damage_to_attacker(&self, attacker: &MapUnit, defender: Combatant<'_>) -> u32;

    /// Health a unit loses at the end of a turn spent on this tile
    fn terrain_damage(&self, unit: &MapUnit, tile: HexCoord) -> u32;
}

/// World mutations issued once a decision is made
pub trait WorldActions {
    fn unit(&self, id: UnitId) -> Option<&MapUnit>;

    /// Move to the option's launch tile if needed, then attack its target
    fn move_and_attack(&mut self, unit: UnitId, option: &AttackOption) -> Result<()>;

    fn move_to(&mut self, unit: UnitId, tile: HexCoord) -> Result<()>;
}

/// Everything the turn actions need
pub trait GameWorld: WorldQuery + UnitMovement + DamageModel + WorldActions {}

impl<T> GameWorld for T where T: WorldQuery + UnitMovement + DamageModel + WorldActions {}
