//! Every legal attack a unit could make this turn
//!
//! Combines the unit's reachable tiles with its attack footprint from each of
//! them and the set of tiles holding legal enemies. Pure with respect to the
//! world: nothing here moves or damages anything.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::automation::legality::is_attackable_enemy_tile;
use crate::combat::combatant::Combatant;
use crate::core::config::TargetingConfig;
use crate::map::hex::HexCoord;
use crate::units::unit::MapUnit;
use crate::units::uniques::UniqueType;
use crate::world::pathfinding::ReachableTiles;
use crate::world::traits::{UnitMovement, WorldQuery};

/// One way to attack: stand on `attack_from`, strike `target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackOption {
    pub attack_from: HexCoord,
    pub target: HexCoord,
    /// Movement left after reaching `attack_from` and paying any setup
    pub movement_left: f32,
}

impl AttackOption {
    pub fn new(attack_from: HexCoord, target: HexCoord, movement_left: f32) -> Self {
        Self {
            attack_from,
            target,
            movement_left,
        }
    }
}

/// Enumerate attack options for `unit`
///
/// `tiles_to_check` restricts the scan for enemies (default: every tile the
/// unit's civilization can see). `stay_on_tile` evaluates from the current
/// tile only; air units always do.
pub fn attackable_targets<W>(
    world: &W,
    unit: &MapUnit,
    reachable: &ReachableTiles,
    tiles_to_check: Option<&[HexCoord]>,
    stay_on_tile: bool,
    config: &TargetingConfig,
) -> Vec<AttackOption>
where
    W: WorldQuery + UnitMovement + ?Sized,
{
    let enemy_tiles = enemy_tiles(world, unit, tiles_to_check);
    if enemy_tiles.is_empty() {
        return Vec::new();
    }

    let launch_tiles = launch_tiles(world, unit, reachable, stay_on_tile, config);
    let sees_past_obstacles =
        unit.has_unique(UniqueType::IndirectFire) || unit.moves_like_air_units();

    let mut options = Vec::new();
    for (attack_from, movement_left) in launch_tiles {
        let footprint = if sees_past_obstacles {
            world.tiles_in_distance(attack_from, unit.range)
        } else {
            world.viewable_tiles(attack_from, unit.range)
        };
        options.extend(
            footprint
                .into_iter()
                .filter(|tile| enemy_tiles.contains(tile))
                .map(|target| AttackOption::new(attack_from, target, movement_left)),
        );
    }

    tracing::debug!(
        unit = %unit.id,
        enemies = enemy_tiles.len(),
        options = options.len(),
        "enumerated attack options"
    );
    options
}

/// Tiles holding enemies the unit may strike, minus civilians it could only capture remotely
fn enemy_tiles<W>(world: &W, unit: &MapUnit, tiles_to_check: Option<&[HexCoord]>) -> AHashSet<HexCoord>
where
    W: WorldQuery + UnitMovement + ?Sized,
{
    let attacker = Combatant::Unit(unit);
    let candidates: Vec<HexCoord> = match tiles_to_check {
        Some(tiles) => tiles.to_vec(),
        None => world.visible_tiles(unit.civ).into_iter().collect(),
    };

    candidates
        .into_iter()
        .filter(|coord| {
            world
                .tile(*coord)
                .is_some_and(|tile| is_attackable_enemy_tile(world, tile, attacker))
        })
        .filter(|coord| !is_remote_capture(world, unit, *coord))
        .collect()
}

/// Capturing a civilian means walking onto its tile; a melee unit that
/// cannot pass there cannot capture it from a distance
fn is_remote_capture<W>(world: &W, unit: &MapUnit, coord: HexCoord) -> bool
where
    W: WorldQuery + UnitMovement + ?Sized,
{
    unit.is_melee()
        && world
            .combatant_at(coord)
            .is_some_and(|defender| defender.is_civilian())
        && !world.can_pass_through(unit, coord)
}

/// Tiles the unit could attack from, with movement left once there
fn launch_tiles<W>(
    world: &W,
    unit: &MapUnit,
    reachable: &ReachableTiles,
    stay_on_tile: bool,
    config: &TargetingConfig,
) -> Vec<(HexCoord, f32)>
where
    W: WorldQuery + UnitMovement + ?Sized,
{
    if stay_on_tile || unit.moves_like_air_units() {
        return vec![(unit.position, unit.current_movement)];
    }

    let must_set_up = unit.has_unique(UniqueType::MustSetUp);
    let setup_after_moving = if must_set_up { config.setup_cost } else { 0.0 };
    let setup_here = if must_set_up && !unit.set_up_for_siege {
        config.setup_cost
    } else {
        0.0
    };

    reachable
        .iter()
        .map(|(tile, entry)| {
            let setup = if *tile == unit.position {
                setup_here
            } else {
                setup_after_moving
            };
            (*tile, unit.current_movement - entry.total_distance - setup)
        })
        .filter(|(_, movement_left)| *movement_left > config.movement_epsilon)
        .filter(|(tile, _)| *tile == unit.position || world.can_move_to(unit, *tile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CivId;
    use crate::map::terrain::Terrain;
    use crate::units::uniques::Unique;
    use crate::units::unit_type::{UnitClass, UnitDomain};
    use crate::world::state::GameState;

    const US: CivId = CivId(1);
    const THEM: CivId = CivId(2);

    fn world() -> GameState {
        let mut state = GameState::new(12, 12);
        state.add_civ(US, "Rome");
        state.add_civ(THEM, "Carthage");
        state.diplomacy.declare_war(US, THEM);
        state
    }

    fn spawn(state: &mut GameState, unit: MapUnit) -> MapUnit {
        let id = state.place_unit(unit).unwrap();
        state.units[&id].clone()
    }

    fn options_for(state: &GameState, unit: &MapUnit, stay: bool) -> Vec<AttackOption> {
        let reach = state.reachable_tiles(unit);
        attackable_targets(state, unit, &reach, None, stay, &TargetingConfig::default())
    }

    fn warrior(civ: CivId, at: HexCoord) -> MapUnit {
        MapUnit::new("Warrior", civ, UnitClass::Melee, UnitDomain::Land).at(at)
    }

    #[test]
    fn test_adjacent_enemy_from_current_tile() {
        let mut state = world();
        let unit = spawn(&mut state, warrior(US, HexCoord::new(5, 5)));
        spawn(&mut state, warrior(THEM, HexCoord::new(6, 5)));

        let options = options_for(&state, &unit, false);
        assert!(options.contains(&AttackOption::new(HexCoord::new(5, 5), HexCoord::new(6, 5), 2.0)));
        assert!(options.iter().all(|o| o.target == HexCoord::new(6, 5)));
    }

    #[test]
    fn test_move_then_attack_needs_movement_left() {
        let mut state = world();
        let unit = spawn(&mut state, warrior(US, HexCoord::new(2, 5)));
        // Two steps to get adjacent leaves nothing to attack with
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));
        assert!(options_for(&state, &unit, false).is_empty());

        // One step to get adjacent leaves one point
        let mut state = world();
        let unit = spawn(&mut state, warrior(US, HexCoord::new(3, 5)));
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));
        let options = options_for(&state, &unit, false);
        assert!(!options.is_empty());
        assert!(options.iter().all(|o| (o.movement_left - 1.0).abs() < f32::EPSILON));
        assert!(options.iter().all(|o| o.attack_from.distance(&HexCoord::new(5, 5)) == 1));
    }

    #[test]
    fn test_stay_on_tile_ignores_reachable() {
        let mut state = world();
        let unit = spawn(&mut state, warrior(US, HexCoord::new(3, 5)));
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));
        assert!(options_for(&state, &unit, true).is_empty());
    }

    #[test]
    fn test_must_set_up_pays_after_moving() {
        let mut state = world();
        let catapult = MapUnit::new("Catapult", US, UnitClass::Ranged, UnitDomain::Land)
            .at(HexCoord::new(3, 5))
            .with_unique(Unique::new(UniqueType::MustSetUp));
        let catapult = spawn(&mut state, catapult);
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));

        let options = options_for(&state, &catapult, false);
        // Moving costs 1 and setting up costs 1: only the current tile remains
        assert!(!options.is_empty());
        assert!(options.iter().all(|o| o.attack_from == HexCoord::new(3, 5)));
        assert!(options.iter().all(|o| (o.movement_left - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_already_set_up_pays_nothing_in_place() {
        let mut state = world();
        let mut catapult = MapUnit::new("Catapult", US, UnitClass::Ranged, UnitDomain::Land)
            .at(HexCoord::new(3, 5))
            .with_unique(Unique::new(UniqueType::MustSetUp));
        catapult.set_up_for_siege = true;
        let catapult = spawn(&mut state, catapult);
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));

        let options = options_for(&state, &catapult, false);
        let in_place = options
            .iter()
            .find(|o| o.attack_from == HexCoord::new(3, 5))
            .unwrap();
        assert!((in_place.movement_left - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_line_of_sight_limits_direct_fire() {
        let mut state = world();
        state.map.set_terrain(HexCoord::new(4, 5), Terrain::Hills);
        let archer = MapUnit::new("Archer", US, UnitClass::Ranged, UnitDomain::Land).at(HexCoord::new(3, 5));
        let archer = spawn(&mut state, archer);
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));

        // Scan the hidden tile explicitly so visibility does not mask the sight-line check
        let reach = state.reachable_tiles(&archer);
        let scan = [HexCoord::new(5, 5)];
        let config = TargetingConfig::default();
        let blocked = attackable_targets(&state, &archer, &reach, Some(&scan), true, &config);
        assert!(blocked.is_empty());

        let artillery = archer.clone().with_unique(Unique::new(UniqueType::IndirectFire));
        let lobbed = attackable_targets(&state, &artillery, &reach, Some(&scan), true, &config);
        assert_eq!(lobbed.len(), 1);
    }

    #[test]
    fn test_air_unit_strikes_from_current_tile_only() {
        let mut state = world();
        let mut bomber = MapUnit::new("Bomber", US, UnitClass::Ranged, UnitDomain::Air).at(HexCoord::new(3, 5));
        bomber.range = 3;
        let bomber = spawn(&mut state, bomber);
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));

        let reach = state.reachable_tiles(&bomber);
        let scan = [HexCoord::new(5, 5)];
        let options = attackable_targets(&state, &bomber, &reach, Some(&scan), false, &TargetingConfig::default());
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].attack_from, HexCoord::new(3, 5));
    }

    #[test]
    fn test_naval_melee_cannot_capture_land_civilian() {
        let mut state = world();
        state.map.set_terrain(HexCoord::new(4, 5), Terrain::Coast);
        let trireme = MapUnit::new("Trireme", US, UnitClass::Melee, UnitDomain::Water).at(HexCoord::new(4, 5));
        let trireme = spawn(&mut state, trireme);
        spawn(
            &mut state,
            MapUnit::new("Worker", THEM, UnitClass::Civilian, UnitDomain::Land).at(HexCoord::new(5, 5)),
        );
        assert!(options_for(&state, &trireme, true).is_empty());

        // A land melee unit can walk there and capture
        let unit = spawn(&mut state, warrior(US, HexCoord::new(5, 4)));
        assert_eq!(options_for(&state, &unit, true).len(), 1);
    }

    #[test]
    fn test_occupied_launch_tiles_skipped() {
        let mut state = world();
        let unit = spawn(&mut state, warrior(US, HexCoord::new(3, 5)));
        spawn(&mut state, warrior(THEM, HexCoord::new(5, 5)));
        spawn(&mut state, warrior(US, HexCoord::new(4, 5)));

        let options = options_for(&state, &unit, false);
        assert!(options.iter().all(|o| o.attack_from != HexCoord::new(4, 5)));
    }

    #[test]
    fn test_all_options_leave_movement() {
        let mut state = world();
        let unit = spawn(&mut state, warrior(US, HexCoord::new(5, 5)));
        for coord in [HexCoord::new(6, 5), HexCoord::new(7, 5), HexCoord::new(5, 7)] {
            spawn(&mut state, warrior(THEM, coord));
        }
        let epsilon = TargetingConfig::default().movement_epsilon;
        assert!(options_for(&state, &unit, false)
            .iter()
            .all(|o| o.movement_left > epsilon));
    }
}
