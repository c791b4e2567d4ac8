//! Per-civilization sight
//!
//! A civilization sees whatever its units and cities see. Invisible units
//! are only revealed next to one of its units or within sight of a unit that
//! can see invisible.

use ahash::AHashSet;

use crate::civ::city::City;
use crate::core::types::CivId;
use crate::map::hex::HexCoord;
use crate::map::world_map::WorldMap;
use crate::units::unit::MapUnit;
use crate::units::uniques::UniqueType;

/// Tiles currently seen by `civ`
pub fn visible_tiles<'a, U, C>(map: &WorldMap, civ: CivId, units: U, cities: C) -> AHashSet<HexCoord>
where
    U: IntoIterator<Item = &'a MapUnit>,
    C: IntoIterator<Item = &'a City>,
{
    let mut visible = AHashSet::new();

    for unit in units.into_iter().filter(|u| u.civ == civ) {
        visible.insert(unit.position);
        visible.extend(map.viewable_tiles(unit.position, unit.vision));
    }
    for city in cities.into_iter().filter(|c| c.civ == civ) {
        visible.insert(city.center);
        visible.extend(map.viewable_tiles(city.center, city.vision));
    }

    visible
}

/// Tiles where `civ` can make out invisible units
pub fn revealed_invisible_tiles<'a, U>(map: &WorldMap, civ: CivId, units: U) -> AHashSet<HexCoord>
where
    U: IntoIterator<Item = &'a MapUnit>,
{
    let mut revealed = AHashSet::new();

    for unit in units.into_iter().filter(|u| u.civ == civ) {
        revealed.extend(map.tiles_in_distance(unit.position, 1));
        if unit.has_unique(UniqueType::CanSeeInvisible) {
            revealed.extend(map.viewable_tiles(unit.position, unit.vision));
        }
    }

    revealed
}
