//! In-memory game world
//!
//! `GameState` owns the map, civilizations, units, and cities, and implements
//! every world trait the targeting engine consumes. It holds one unit per
//! tile; a city center may host one unit as its garrison.

use ahash::{AHashMap, AHashSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::automation::attackable::AttackOption;
use crate::civ::city::{City, CITY_MAX_HEALTH};
use crate::civ::civilization::{Civilization, Diplomacy};
use crate::combat::combatant::Combatant;
use crate::combat::damage::StrengthDamageModel;
use crate::combat::log::{CombatLog, CombatOutcome, CombatRecord};
use crate::core::config::{CombatConfig, TargetingConfig};
use crate::core::error::{Result, WarpathError};
use crate::core::types::{CityId, CivId, Turn, UnitId};
use crate::map::hex::HexCoord;
use crate::map::tile::Tile;
use crate::map::world_map::WorldMap;
use crate::units::unit::MapUnit;
use crate::units::uniques::UniqueType;
use crate::world::pathfinding::{reachable_within, ReachableTiles};
use crate::world::traits::{DamageModel, UnitMovement, WorldActions, WorldQuery};
use crate::world::visibility;

/// Defender resolved to an owned handle so the world can be mutated
#[derive(Debug, Clone, Copy)]
enum DefenderRef {
    Unit(UnitId),
    City(CityId),
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub map: WorldMap,
    pub civs: AHashMap<CivId, Civilization>,
    pub diplomacy: Diplomacy,
    pub units: AHashMap<UnitId, MapUnit>,
    pub cities: AHashMap<CityId, City>,
    pub turn: Turn,
    pub combat_log: CombatLog,
    pub targeting: TargetingConfig,
    damage: StrengthDamageModel,
    positions: AHashMap<HexCoord, UnitId>,
    rng: ChaCha8Rng,
}

impl GameState {
    /// Grassland world with default configs
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, CombatConfig::default(), TargetingConfig::default())
    }

    pub fn with_config(width: u32, height: u32, combat: CombatConfig, targeting: TargetingConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(combat.seed);
        Self {
            map: WorldMap::new(width, height),
            civs: AHashMap::new(),
            diplomacy: Diplomacy::new(),
            units: AHashMap::new(),
            cities: AHashMap::new(),
            turn: 1,
            combat_log: CombatLog::new(),
            targeting,
            damage: StrengthDamageModel::new(combat),
            positions: AHashMap::new(),
            rng,
        }
    }

    pub fn add_civ(&mut self, id: CivId, name: impl Into<String>) {
        self.civs.insert(id, Civilization::new(id, name));
    }

    /// Put a unit on the map; a land unit placed on water starts embarked
    pub fn place_unit(&mut self, mut unit: MapUnit) -> Result<UnitId> {
        let tile = self
            .map
            .get(unit.position)
            .ok_or(WarpathError::TileNotFound(unit.position))?;
        if self.positions.contains_key(&unit.position) {
            return Err(WarpathError::IllegalMove {
                unit: unit.id,
                to: unit.position,
            });
        }
        if unit.is_land_unit() {
            unit.embarked = tile.is_water();
        }

        let id = unit.id;
        self.positions.insert(unit.position, id);
        debug!(unit = %id, name = %unit.name, civ = %unit.civ, at = ?unit.position, "unit placed");
        self.units.insert(id, unit);
        Ok(id)
    }

    pub fn found_city(&mut self, name: impl Into<String>, civ: CivId, center: HexCoord) -> Result<CityId> {
        let tile = self
            .map
            .get_mut(center)
            .ok_or(WarpathError::TileNotFound(center))?;
        if tile.city.is_some() {
            return Err(WarpathError::Rules(format!("tile {center:?} already has a city")));
        }
        let city = City::new(name, civ, center);
        let id = city.id;
        tile.city = Some(id);
        self.cities.insert(id, city);
        Ok(id)
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn unit_at(&self, coord: HexCoord) -> Option<&MapUnit> {
        self.positions.get(&coord).and_then(|id| self.units.get(id))
    }

    pub fn city_at(&self, coord: HexCoord) -> Option<&City> {
        self.map
            .get(coord)
            .and_then(|tile| tile.city)
            .and_then(|id| self.cities.get(&id))
    }

    /// Units of `civ`, ordered by position so turn processing is reproducible
    pub fn units_of(&self, civ: CivId) -> Vec<UnitId> {
        let mut units: Vec<&MapUnit> = self.units.values().filter(|u| u.civ == civ).collect();
        units.sort_by_key(|u| u.position);
        units.into_iter().map(|u| u.id).collect()
    }

    pub fn cities_of(&self, civ: CivId) -> impl Iterator<Item = &City> {
        self.cities.values().filter(move |c| c.civ == civ)
    }

    /// Civilization ids in ascending order
    pub fn civ_ids(&self) -> Vec<CivId> {
        let mut ids: Vec<CivId> = self.civs.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn remove_unit(&mut self, id: UnitId) -> Option<MapUnit> {
        let unit = self.units.remove(&id)?;
        if self.positions.get(&unit.position) == Some(&id) {
            self.positions.remove(&unit.position);
        }
        Some(unit)
    }

    /// Begin a new turn: restore movement, then apply terrain attrition
    pub fn start_turn(&mut self) {
        self.turn += 1;

        let mut dead = Vec::new();
        for unit in self.units.values_mut() {
            unit.restore_movement();
            let attrition = self
                .map
                .get(unit.position)
                .map_or(0, |tile| self.damage.terrain_damage(tile));
            unit.health = unit.health.saturating_sub(attrition);
            if unit.health == 0 {
                dead.push(unit.id);
            }
        }
        for id in dead {
            if let Some(unit) = self.remove_unit(id) {
                info!(unit = %id, name = %unit.name, "unit lost to terrain");
            }
        }
        debug!(turn = self.turn, "turn started");
    }

    fn relocate(&mut self, id: UnitId, to: HexCoord) {
        if let Some(unit) = self.units.get_mut(&id) {
            if self.positions.get(&unit.position) == Some(&id) {
                self.positions.remove(&unit.position);
            }
            unit.position = to;
            if unit.is_land_unit() {
                unit.embarked = self.map.get(to).is_some_and(|tile| tile.is_water());
            }
            self.positions.insert(to, id);
        }
    }

    fn can_enter_terrain(&self, unit: &MapUnit, tile: &Tile) -> bool {
        if unit.moves_like_air_units() {
            return true;
        }
        if unit.is_water_unit() {
            let own_port = self
                .city_at(tile.coord)
                .is_some_and(|city| city.civ == unit.civ);
            return tile.is_water() || own_port;
        }
        tile.movement_cost().is_finite()
    }

    fn step_cost(&self, unit: &MapUnit, to: HexCoord) -> Option<f32> {
        if !self.can_pass_through(unit, to) {
            return None;
        }
        let tile = self.map.get(to)?;
        if unit.moves_like_air_units() || tile.is_water() {
            Some(1.0)
        } else {
            Some(tile.movement_cost())
        }
    }

    fn resolve_defender(&self, coord: HexCoord) -> Result<DefenderRef> {
        match self.combatant_at(coord) {
            Some(Combatant::City(city)) => Ok(DefenderRef::City(city.id)),
            Some(Combatant::Unit(unit)) => Ok(DefenderRef::Unit(unit.id)),
            None => Err(WarpathError::MissingCombatant(coord)),
        }
    }

    fn attack_unit(&mut self, attacker_id: UnitId, defender_id: UnitId) -> Result<(u32, u32, CombatOutcome)> {
        let attacker = self
            .units
            .get(&attacker_id)
            .cloned()
            .ok_or(WarpathError::UnitNotFound(attacker_id))?;
        let defender = self
            .units
            .get(&defender_id)
            .cloned()
            .ok_or(WarpathError::UnitNotFound(defender_id))?;

        if defender.is_civilian() && attacker.is_melee() {
            if let Some(captured) = self.units.get_mut(&defender_id) {
                captured.civ = attacker.civ;
                captured.current_movement = 0.0;
            }
            info!(attacker = %attacker_id, captured = %defender_id, "civilian captured");
            return Ok((0, 0, CombatOutcome::CivilianCaptured));
        }

        let dealt = self
            .damage
            .roll(
                self.damage
                    .predicted_damage_to_defender(Combatant::Unit(&attacker), Combatant::Unit(&defender)),
                &mut self.rng,
            )
            .max(1);
        let taken = self.damage.roll(
            self.damage
                .predicted_damage_to_attacker(&attacker, Combatant::Unit(&defender)),
            &mut self.rng,
        );

        let defender_health = defender.health.saturating_sub(dealt);
        let attacker_health = attacker.health.saturating_sub(taken);
        if let Some(unit) = self.units.get_mut(&defender_id) {
            unit.health = defender_health;
        }
        if let Some(unit) = self.units.get_mut(&attacker_id) {
            unit.health = attacker_health;
        }

        if attacker_health == 0 {
            self.remove_unit(attacker_id);
            info!(unit = %attacker_id, "attacker died");
        }
        if defender_health == 0 {
            self.remove_unit(defender_id);
            info!(unit = %defender_id, "defender killed");
            if attacker.is_melee() && attacker_health > 0 && self.city_at(defender.position).is_none() {
                self.relocate(attacker_id, defender.position);
            }
            return Ok((dealt, taken, CombatOutcome::Killed));
        }
        Ok((dealt, taken, CombatOutcome::Damaged))
    }

    fn attack_city(&mut self, attacker_id: UnitId, city_id: CityId) -> Result<(u32, u32, CombatOutcome)> {
        let attacker = self
            .units
            .get(&attacker_id)
            .cloned()
            .ok_or(WarpathError::UnitNotFound(attacker_id))?;
        let city = self
            .cities
            .get(&city_id)
            .cloned()
            .ok_or_else(|| WarpathError::Rules(format!("city {city_id:?} vanished")))?;

        let dealt = self
            .damage
            .roll(
                self.damage
                    .predicted_damage_to_defender(Combatant::Unit(&attacker), Combatant::City(&city)),
                &mut self.rng,
            )
            .max(1);
        let taken = self.damage.roll(
            self.damage.predicted_damage_to_attacker(&attacker, Combatant::City(&city)),
            &mut self.rng,
        );

        let attacker_health = attacker.health.saturating_sub(taken);
        if let Some(unit) = self.units.get_mut(&attacker_id) {
            unit.health = attacker_health;
        }
        if attacker_health == 0 {
            self.remove_unit(attacker_id);
            info!(unit = %attacker_id, city = %city.name, "attacker died at the walls");
        }

        let remaining = city.health.saturating_sub(dealt);
        if remaining == 0 && attacker.is_melee() && attacker_health > 0 {
            if let Some(garrison) = self.positions.get(&city.center).copied() {
                self.remove_unit(garrison);
            }
            if let Some(captured) = self.cities.get_mut(&city_id) {
                captured.civ = attacker.civ;
                captured.health = CITY_MAX_HEALTH / 2;
            }
            self.relocate(attacker_id, city.center);
            info!(city = %city.name, by = %attacker.civ, "city captured");
            return Ok((dealt, taken, CombatOutcome::CityCaptured));
        }

        // Only a melee unit can take a city, so anything else leaves it standing
        if let Some(besieged) = self.cities.get_mut(&city_id) {
            besieged.health = remaining.max(1);
        }
        Ok((dealt, taken, CombatOutcome::Damaged))
    }
}

impl WorldQuery for GameState {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.map.get(coord)
    }

    fn combatant_at(&self, coord: HexCoord) -> Option<Combatant<'_>> {
        if let Some(city) = self.city_at(coord) {
            return Some(Combatant::City(city));
        }
        self.unit_at(coord).map(Combatant::Unit)
    }

    fn is_at_war(&self, a: CivId, b: CivId) -> bool {
        self.diplomacy.is_at_war(a, b)
    }

    fn visible_tiles(&self, civ: CivId) -> AHashSet<HexCoord> {
        visibility::visible_tiles(&self.map, civ, self.units.values(), self.cities.values())
    }

    fn revealed_invisible_tiles(&self, civ: CivId) -> AHashSet<HexCoord> {
        visibility::revealed_invisible_tiles(&self.map, civ, self.units.values())
    }

    fn tiles_in_distance(&self, center: HexCoord, range: u32) -> Vec<HexCoord> {
        self.map.tiles_in_distance(center, range)
    }

    fn viewable_tiles(&self, center: HexCoord, range: u32) -> Vec<HexCoord> {
        self.map.viewable_tiles(center, range)
    }
}

impl UnitMovement for GameState {
    fn reachable_tiles(&self, unit: &MapUnit) -> ReachableTiles {
        reachable_within(unit.position, unit.current_movement, |_, to| self.step_cost(unit, to))
    }

    fn can_move_to(&self, unit: &MapUnit, tile: HexCoord) -> bool {
        if !self.can_pass_through(unit, tile) {
            return false;
        }
        let occupied = self.positions.get(&tile).is_some_and(|id| *id != unit.id);
        !occupied
    }

    fn can_pass_through(&self, unit: &MapUnit, coord: HexCoord) -> bool {
        let Some(tile) = self.map.get(coord) else {
            return false;
        };
        if !self.can_enter_terrain(unit, tile) {
            return false;
        }
        if self.city_at(coord).is_some_and(|city| city.civ != unit.civ) {
            return false;
        }
        match self.unit_at(coord) {
            Some(other) if other.civ == unit.civ => true,
            // Walking onto an enemy civilian captures it
            Some(other) => other.is_civilian() && self.is_at_war(unit.civ, other.civ),
            None => true,
        }
    }
}

impl DamageModel for GameState {
    fn damage_to_attacker(&self, attacker: &MapUnit, defender: Combatant<'_>) -> u32 {
        self.damage.predicted_damage_to_attacker(attacker, defender)
    }

    fn terrain_damage(&self, _unit: &MapUnit, tile: HexCoord) -> u32 {
        self.map
            .get(tile)
            .map_or(0, |tile| self.damage.terrain_damage(tile))
    }
}

impl WorldActions for GameState {
    fn unit(&self, id: UnitId) -> Option<&MapUnit> {
        self.units.get(&id)
    }

    fn move_to(&mut self, id: UnitId, to: HexCoord) -> Result<()> {
        let unit = self.units.get(&id).ok_or(WarpathError::UnitNotFound(id))?;
        if unit.position == to {
            return Ok(());
        }
        let spent = self
            .reachable_tiles(unit)
            .get(to)
            .map(|entry| entry.total_distance)
            .filter(|_| self.can_move_to(unit, to))
            .ok_or(WarpathError::IllegalMove { unit: id, to })?;

        let from = unit.position;
        self.relocate(id, to);
        if let Some(unit) = self.units.get_mut(&id) {
            unit.current_movement = (unit.current_movement - spent).max(0.0);
            unit.set_up_for_siege = false;
        }
        info!(unit = %id, ?from, ?to, spent, "moved");
        Ok(())
    }

    fn move_and_attack(&mut self, id: UnitId, option: &AttackOption) -> Result<()> {
        self.move_to(id, option.attack_from)?;

        let attacker = self.units.get(&id).ok_or(WarpathError::UnitNotFound(id))?;
        if attacker.position.distance(&option.target) > attacker.range {
            return Err(WarpathError::IllegalMove {
                unit: id,
                to: option.target,
            });
        }
        let attacker_civ = attacker.civ;
        if attacker.has_unique(UniqueType::MustSetUp) && !attacker.set_up_for_siege {
            let setup_cost = self.targeting.setup_cost;
            if let Some(unit) = self.units.get_mut(&id) {
                unit.set_up_for_siege = true;
                unit.current_movement = (unit.current_movement - setup_cost).max(0.0);
            }
        }

        let defender_civ = self
            .combatant_at(option.target)
            .ok_or(WarpathError::MissingCombatant(option.target))?
            .civ();
        let (dealt, taken, outcome) = match self.resolve_defender(option.target)? {
            DefenderRef::Unit(defender) => self.attack_unit(id, defender)?,
            DefenderRef::City(city) => self.attack_city(id, city)?,
        };

        if let Some(unit) = self.units.get_mut(&id) {
            unit.current_movement = 0.0;
        }
        self.combat_log.push(CombatRecord {
            turn: self.turn,
            attacker: id,
            attacker_civ,
            attack_from: option.attack_from,
            target: option.target,
            defender_civ,
            damage_dealt: dealt,
            damage_taken: taken,
            outcome,
        });
        Ok(())
    }
}
