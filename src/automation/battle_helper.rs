//! Turn actions for automated units
//!
//! `BattleHelper` wires the mapper, a survivability filter, and the chooser
//! together, then issues at most one move and one attack against the world.
//! All evaluation happens on a shared borrow of the world before the single
//! mutable call.

use tracing::{debug, info};

use crate::automation::attackable::{self, AttackOption};
use crate::automation::chooser::choose_target;
use crate::combat::combatant::Combatant;
use crate::core::config::TargetingConfig;
use crate::core::error::{Result, WarpathError};
use crate::core::types::UnitId;
use crate::map::hex::HexCoord;
use crate::units::unit::MapUnit;
use crate::world::pathfinding::ReachableTiles;
use crate::world::traits::{GameWorld, UnitMovement, WorldQuery};

/// Attack decision-making for one AI player's units
#[derive(Debug, Clone, Default)]
pub struct BattleHelper {
    pub config: TargetingConfig,
}

impl BattleHelper {
    pub fn new(config: TargetingConfig) -> Self {
        Self { config }
    }

    /// Every legal attack `unit` could make from its reachable tiles
    pub fn attackable_targets<W>(
        &self,
        world: &W,
        unit: &MapUnit,
        reachable: &ReachableTiles,
        tiles_to_check: Option<&[HexCoord]>,
        stay_on_tile: bool,
    ) -> Vec<AttackOption>
    where
        W: WorldQuery + UnitMovement + ?Sized,
    {
        attackable::attackable_targets(world, unit, reachable, tiles_to_check, stay_on_tile, &self.config)
    }

    /// Attack the best target the unit survives attacking
    ///
    /// Returns true when the unit has no movement left afterwards, so the
    /// caller can stop issuing orders to it.
    pub fn attack_if_safe<W>(&self, world: &mut W, unit_id: UnitId, stay_on_tile: bool) -> Result<bool>
    where
        W: GameWorld + ?Sized,
    {
        let unit = world
            .unit(unit_id)
            .cloned()
            .ok_or(WarpathError::UnitNotFound(unit_id))?;

        // Civilians and `CannotAttack` units never start a fight
        if !unit.can_attack() {
            return Ok(false);
        }

        let reachable = world.reachable_tiles(&unit);
        let options = self.attackable_targets(&*world, &unit, &reachable, None, stay_on_tile);

        let mut safe = Vec::with_capacity(options.len());
        for option in options {
            let defender = defender_at(&*world, option.target)?;
            let damage = world.damage_to_attacker(&unit, defender)
                + world.terrain_damage(&unit, option.attack_from);
            if damage < unit.health {
                safe.push(option);
            }
        }
        debug!(unit = %unit.id, safe = safe.len(), "survivable attack options");

        if let Some(choice) = choose_target(&*world, &unit, &safe, &self.config)? {
            info!(
                unit = %unit.id,
                name = %unit.name,
                from = ?choice.attack_from,
                target = ?choice.target,
                "attacking"
            );
            world.move_and_attack(unit_id, &choice)?;
        }

        // A unit that died attacking has nothing left to do either
        Ok(world
            .unit(unit_id)
            .map_or(true, |unit| !unit.has_movement_left()))
    }

    /// Move an embarked melee land unit ashore next to something it can beat
    ///
    /// Only repositions; the attack itself is left for a later action.
    /// Returns true when the unit moved.
    pub fn disembark_toward_attack<W>(&self, world: &mut W, unit_id: UnitId) -> Result<bool>
    where
        W: GameWorld + ?Sized,
    {
        let unit = world
            .unit(unit_id)
            .cloned()
            .ok_or(WarpathError::UnitNotFound(unit_id))?;

        if !unit.is_melee() || !unit.is_land_unit() || !unit.is_embarked() {
            return Ok(false);
        }

        let reachable = world.reachable_tiles(&unit);
        let options = self.attackable_targets(&*world, &unit, &reachable, None, false);

        let mut landings = Vec::with_capacity(options.len());
        for option in options {
            let on_land = world
                .tile(option.attack_from)
                .is_some_and(|tile| tile.is_land());
            if !on_land {
                continue;
            }
            let defender = defender_at(&*world, option.target)?;
            if world.damage_to_attacker(&unit, defender) < unit.health {
                landings.push(option);
            }
        }

        let Some(choice) = choose_target(&*world, &unit, &landings, &self.config)? else {
            return Ok(false);
        };
        info!(unit = %unit.id, to = ?choice.attack_from, "disembarking toward attack");
        world.move_to(unit_id, choice.attack_from)?;
        Ok(true)
    }
}

fn defender_at<W>(world: &W, target: HexCoord) -> Result<Combatant<'_>>
where
    W: WorldQuery + ?Sized,
{
    world
        .combatant_at(target)
        .ok_or(WarpathError::MissingCombatant(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CivId;
    use crate::map::terrain::{Terrain, TerrainFeature};
    use crate::units::uniques::{Unique, UniqueType};
    use crate::units::unit_type::{UnitClass, UnitDomain};
    use crate::world::state::GameState;
    use crate::world::traits::WorldActions;

    const US: CivId = CivId(1);
    const THEM: CivId = CivId(2);

    fn world() -> GameState {
        let mut state = GameState::new(12, 12);
        state.add_civ(US, "Rome");
        state.add_civ(THEM, "Carthage");
        state.diplomacy.declare_war(US, THEM);
        state
    }

    fn unit(name: &str, civ: CivId, class: UnitClass, at: HexCoord) -> MapUnit {
        MapUnit::new(name, civ, class, UnitDomain::Land).at(at)
    }

    #[test]
    fn test_unknown_unit_is_error() {
        let mut state = world();
        let result = BattleHelper::default().attack_if_safe(&mut state, UnitId::new(), false);
        assert!(matches!(result, Err(WarpathError::UnitNotFound(_))));
    }

    #[test]
    fn test_cannot_attack_unit_never_attacks() {
        let mut state = world();
        let scout = unit("Scout", US, UnitClass::Melee, HexCoord::new(5, 5))
            .with_unique(Unique::new(UniqueType::CannotAttack));
        let scout_id = state.place_unit(scout).unwrap();
        let target = state
            .place_unit(unit("Warrior", THEM, UnitClass::Melee, HexCoord::new(6, 5)))
            .unwrap();

        let done = BattleHelper::default().attack_if_safe(&mut state, scout_id, false).unwrap();
        assert!(!done);
        assert_eq!(state.units[&target].health, 100);
        assert!(state.combat_log.is_empty());
    }

    #[test]
    fn test_attacks_weak_adjacent_enemy() {
        let mut state = world();
        let mut attacker = unit("Swordsman", US, UnitClass::Melee, HexCoord::new(5, 5));
        attacker.strength = 20;
        let attacker_id = state.place_unit(attacker).unwrap();
        let mut victim = unit("Warrior", THEM, UnitClass::Melee, HexCoord::new(6, 5));
        victim.health = 40;
        state.place_unit(victim).unwrap();

        let done = BattleHelper::default().attack_if_safe(&mut state, attacker_id, false).unwrap();
        assert!(done);
        assert_eq!(state.combat_log.len(), 1);
    }

    #[test]
    fn test_skips_unsurvivable_attack() {
        let mut state = world();
        let mut attacker = unit("Warrior", US, UnitClass::Melee, HexCoord::new(5, 5));
        attacker.health = 5;
        let attacker_id = state.place_unit(attacker).unwrap();
        let mut defender = unit("Pikeman", THEM, UnitClass::Melee, HexCoord::new(6, 5));
        defender.strength = 40;
        state.place_unit(defender).unwrap();

        let done = BattleHelper::default().attack_if_safe(&mut state, attacker_id, false).unwrap();
        assert!(!done);
        assert!(state.combat_log.is_empty());
        assert_eq!(state.unit(attacker_id).unwrap().position, HexCoord::new(5, 5));
    }

    #[test]
    fn test_ranged_attack_is_always_survivable() {
        let mut state = world();
        let mut archer = unit("Archer", US, UnitClass::Ranged, HexCoord::new(5, 5));
        archer.health = 5;
        archer.ranged_strength = 8;
        let archer_id = state.place_unit(archer).unwrap();
        let mut defender = unit("Pikeman", THEM, UnitClass::Melee, HexCoord::new(7, 5));
        defender.strength = 40;
        state.place_unit(defender).unwrap();

        assert!(BattleHelper::default().attack_if_safe(&mut state, archer_id, true).unwrap());
        assert_eq!(state.combat_log.len(), 1);
    }

    #[test]
    fn test_terrain_damage_counts_toward_safety() {
        let mut state = world();
        state.map.add_feature(HexCoord::new(5, 5), TerrainFeature::Fallout);
        let mut archer = unit("Archer", US, UnitClass::Ranged, HexCoord::new(5, 5));
        archer.health = 10;
        let archer_id = state.place_unit(archer).unwrap();
        state
            .place_unit(unit("Warrior", THEM, UnitClass::Melee, HexCoord::new(6, 5)))
            .unwrap();

        // No retaliation, but the fallout under it would finish the archer
        let done = BattleHelper::default().attack_if_safe(&mut state, archer_id, true).unwrap();
        assert!(!done);
        assert!(state.combat_log.is_empty());
    }

    #[test]
    fn test_melee_safety_adds_launch_tile_damage() {
        let attack_with_fallout = |fallout: bool| {
            let mut state = world();
            if fallout {
                state.map.add_feature(HexCoord::new(5, 5), TerrainFeature::Fallout);
            }
            let mut attacker = unit("Swordsman", US, UnitClass::Melee, HexCoord::new(5, 5));
            attacker.strength = 20;
            attacker.health = 30;
            let attacker_id = state.place_unit(attacker).unwrap();
            state
                .place_unit(unit("Warrior", THEM, UnitClass::Melee, HexCoord::new(6, 5)))
                .unwrap();
            BattleHelper::default().attack_if_safe(&mut state, attacker_id, true).unwrap();
            state.combat_log.len()
        };

        // Retaliation of 23 is survivable at 30 health; 23 + 15 is not
        assert_eq!(attack_with_fallout(false), 1);
        assert_eq!(attack_with_fallout(true), 0);
    }

    #[test]
    fn test_no_targets_keeps_movement() {
        let mut state = world();
        let id = state
            .place_unit(unit("Warrior", US, UnitClass::Melee, HexCoord::new(5, 5)))
            .unwrap();
        assert!(!BattleHelper::default().attack_if_safe(&mut state, id, false).unwrap());
        assert_eq!(state.unit(id).unwrap().current_movement, 2.0);
    }

    #[test]
    fn test_disembark_requires_embarked_melee_land() {
        let mut state = world();
        let id = state
            .place_unit(unit("Warrior", US, UnitClass::Melee, HexCoord::new(5, 5)))
            .unwrap();
        state
            .place_unit(unit("Warrior", THEM, UnitClass::Melee, HexCoord::new(7, 5)))
            .unwrap();
        assert!(!BattleHelper::default().disembark_toward_attack(&mut state, id).unwrap());
        assert_eq!(state.unit(id).unwrap().position, HexCoord::new(5, 5));
    }

    #[test]
    fn test_disembark_ignores_embarked_ranged_and_naval_units() {
        let mut state = world();
        for r in 0..12 {
            state.map.set_terrain(HexCoord::new(4, r), Terrain::Coast);
        }
        let mut archer = unit("Archer", US, UnitClass::Ranged, HexCoord::new(4, 3));
        archer.embarked = true;
        let archer_id = state.place_unit(archer).unwrap();
        let trireme_id = state
            .place_unit(MapUnit::new("Trireme", US, UnitClass::Melee, UnitDomain::Water).at(HexCoord::new(4, 7)))
            .unwrap();
        for at in [HexCoord::new(5, 3), HexCoord::new(5, 7)] {
            state.place_unit(unit("Warrior", THEM, UnitClass::Melee, at)).unwrap();
        }

        let helper = BattleHelper::default();
        assert!(!helper.disembark_toward_attack(&mut state, archer_id).unwrap());
        assert!(!helper.disembark_toward_attack(&mut state, trireme_id).unwrap());
        assert_eq!(state.unit(archer_id).unwrap().position, HexCoord::new(4, 3));
        assert_eq!(state.unit(trireme_id).unwrap().position, HexCoord::new(4, 7));
    }

    #[test]
    fn test_disembark_ignores_landing_tile_damage() {
        let mut state = world();
        for q in 0..5 {
            for r in 0..12 {
                state.map.set_terrain(HexCoord::new(q, r), Terrain::Coast);
            }
        }
        let enemy = HexCoord::new(6, 5);
        for coord in enemy.neighbors() {
            state.map.add_feature(coord, TerrainFeature::Fallout);
        }
        let mut marine = unit("Swordsman", US, UnitClass::Melee, HexCoord::new(4, 5));
        marine.embarked = true;
        marine.strength = 20;
        marine.health = 30;
        marine.current_movement = 3.0;
        let marine_id = state.place_unit(marine).unwrap();
        state.place_unit(unit("Warrior", THEM, UnitClass::Melee, enemy)).unwrap();

        // Retaliation alone is survivable; fallout is not weighed when landing
        assert!(BattleHelper::default().disembark_toward_attack(&mut state, marine_id).unwrap());
        let landed = state.unit(marine_id).unwrap();
        assert!(landed.position.is_adjacent(&enemy));
        assert!(state.map.get(landed.position).unwrap().has_feature(TerrainFeature::Fallout));
    }

    #[test]
    fn test_disembark_lands_next_to_enemy() {
        let mut state = world();
        for q in 0..5 {
            for r in 0..12 {
                state.map.set_terrain(HexCoord::new(q, r), Terrain::Coast);
            }
        }
        let mut marine = unit("Warrior", US, UnitClass::Melee, HexCoord::new(4, 5));
        marine.embarked = true;
        let marine_id = state.place_unit(marine).unwrap();
        state
            .place_unit(unit("Warrior", THEM, UnitClass::Melee, HexCoord::new(6, 5)))
            .unwrap();

        let moved = BattleHelper::default().disembark_toward_attack(&mut state, marine_id).unwrap();
        assert!(moved);
        let landed = state.unit(marine_id).unwrap();
        assert!(state.map.get(landed.position).unwrap().is_land());
        assert!(!landed.is_embarked());
        assert!(landed.position.is_adjacent(&HexCoord::new(6, 5)));
        // Moving only; nothing was attacked
        assert!(state.combat_log.is_empty());
    }
}
