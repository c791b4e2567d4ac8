//! Does a tile hold something this attacker may strike right now?
//!
//! Movement and range are ignored here; only ownership, diplomacy, terrain
//! class, rule modifiers, and visibility are checked. The checks run in a
//! fixed order and the first failing one decides.

use crate::combat::combatant::Combatant;
use crate::map::tile::Tile;
use crate::units::uniques::{Unique, UniqueType};
use crate::world::traits::WorldQuery;

/// Why a tile was refused as a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Veto {
    /// Embarked attackers without sea assault strike only land, and never at range
    Embarked,
    NoOccupant,
    FriendlyFire,
    NotAtWar,
    /// Land melee units cannot strike into water without embarkation
    WaterTarget,
    UnitCategory,
    TileFilter,
    Invisible,
}

/// True iff `tile` currently hosts a combatant `attacker` may legally target
pub fn is_attackable_enemy_tile<W>(world: &W, tile: &Tile, attacker: Combatant<'_>) -> bool
where
    W: WorldQuery + ?Sized,
{
    match veto(world, tile, attacker) {
        None => true,
        Some(reason) => {
            tracing::trace!(tile = ?tile.coord, ?reason, "target vetoed");
            false
        }
    }
}

/// First rule that refuses `tile` as a target, if any
pub fn veto<W>(world: &W, tile: &Tile, attacker: Combatant<'_>) -> Option<Veto>
where
    W: WorldQuery + ?Sized,
{
    let unit = attacker.as_unit();

    if let Some(unit) = unit {
        if unit.is_embarked()
            && !unit.has_unique(UniqueType::AttackOnSea)
            && (tile.is_water() || unit.is_ranged())
        {
            return Some(Veto::Embarked);
        }
    }

    let Some(defender) = world.combatant_at(tile.coord) else {
        return Some(Veto::NoOccupant);
    };
    if defender.civ() == attacker.civ() {
        return Some(Veto::FriendlyFire);
    }
    if !world.is_at_war(attacker.civ(), defender.civ()) {
        return Some(Veto::NotAtWar);
    }

    if let Some(unit) = unit {
        if unit.is_land_unit()
            && unit.is_melee()
            && !unit.has_unique(UniqueType::LandUnitEmbarkation)
            && tile.is_water()
        {
            return Some(Veto::WaterTarget);
        }

        let mut categories = unit.uniques.matching(UniqueType::CanOnlyAttackUnits).peekable();
        if categories.peek().is_some()
            && !categories.any(|u| u.filter().is_some_and(|f| defender.matches_category(f)))
        {
            return Some(Veto::UnitCategory);
        }

        let tile_filters: Vec<&Unique> = unit.uniques.matching(UniqueType::CanOnlyAttackTiles).collect();
        if !tile_filters.is_empty()
            && !tile_filters
                .iter()
                .any(|u| u.filter().is_some_and(|f| tile.matches_filter(f)))
        {
            return Some(Veto::TileFilter);
        }
    }

    // A garrisoned invisible unit stays attackable, else its city could never fall
    if defender.is_invisible_to(attacker.civ()) && !tile.is_city_center() {
        let revealed = unit.is_some()
            && world
                .revealed_invisible_tiles(attacker.civ())
                .contains(&tile.coord);
        if !revealed {
            return Some(Veto::Invisible);
        }
    }

    None
}
