//! Anything that can fight: a unit or a city
//!
//! Combatants are borrowed views into world storage. The targeting code
//! queries them for ownership, health, and classification and never needs to
//! know which variant it holds, except through `matches_category`.

use crate::core::types::CivId;
use crate::civ::city::City;
use crate::map::hex::HexCoord;
use crate::units::unit::{MapUnit, MAX_HEALTH};
use crate::units::uniques::UniqueType;

#[derive(Debug, Clone, Copy)]
pub enum Combatant<'a> {
    Unit(&'a MapUnit),
    City(&'a City),
}

impl<'a> Combatant<'a> {
    pub fn civ(&self) -> CivId {
        match self {
            Combatant::Unit(unit) => unit.civ,
            Combatant::City(city) => city.civ,
        }
    }

    pub fn health(&self) -> u32 {
        match self {
            Combatant::Unit(unit) => unit.health,
            Combatant::City(city) => city.health,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            Combatant::Unit(_) => MAX_HEALTH,
            Combatant::City(city) => city.max_health(),
        }
    }

    pub fn position(&self) -> HexCoord {
        match self {
            Combatant::Unit(unit) => unit.position,
            Combatant::City(city) => city.center,
        }
    }

    /// Strength used when this combatant attacks
    pub fn attacking_strength(&self) -> u32 {
        match self {
            Combatant::Unit(unit) if unit.is_ranged() => unit.ranged_strength,
            Combatant::Unit(unit) => unit.strength,
            Combatant::City(city) => city.strength,
        }
    }

    /// Strength used when this combatant is attacked
    pub fn defending_strength(&self) -> u32 {
        match self {
            Combatant::Unit(unit) => unit.strength,
            Combatant::City(city) => city.strength,
        }
    }

    pub fn is_melee(&self) -> bool {
        matches!(self, Combatant::Unit(unit) if unit.is_melee())
    }

    /// Cities always fight at range
    pub fn is_ranged(&self) -> bool {
        match self {
            Combatant::Unit(unit) => unit.is_ranged(),
            Combatant::City(_) => true,
        }
    }

    pub fn is_land_unit(&self) -> bool {
        matches!(self, Combatant::Unit(unit) if unit.is_land_unit())
    }

    pub fn is_civilian(&self) -> bool {
        matches!(self, Combatant::Unit(unit) if unit.is_civilian())
    }

    pub fn is_city(&self) -> bool {
        matches!(self, Combatant::City(_))
    }

    pub fn as_unit(&self) -> Option<&'a MapUnit> {
        match *self {
            Combatant::Unit(unit) => Some(unit),
            Combatant::City(_) => None,
        }
    }

    pub fn has_unique(&self, kind: UniqueType) -> bool {
        matches!(self, Combatant::Unit(unit) if unit.has_unique(kind))
    }

    /// Hidden from `viewer` unless the viewer owns it
    pub fn is_invisible_to(&self, viewer: CivId) -> bool {
        match self {
            Combatant::Unit(unit) => unit.is_invisible() && unit.civ != viewer,
            Combatant::City(_) => false,
        }
    }

    pub fn matches_category(&self, category: &str) -> bool {
        match self {
            Combatant::Unit(unit) => unit.matches_filter(category),
            Combatant::City(_) => matches!(category, "City" | "All"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::uniques::Unique;
    use crate::units::unit_type::{UnitClass, UnitDomain};

    #[test]
    fn test_city_is_ranged_not_melee() {
        let city = City::new("Sparta", CivId(1), HexCoord::new(0, 0));
        let combatant = Combatant::City(&city);
        assert!(combatant.is_ranged());
        assert!(!combatant.is_melee());
        assert!(combatant.matches_category("City"));
        assert!(!combatant.matches_category("Land"));
    }

    #[test]
    fn test_invisible_only_to_others() {
        let sub = MapUnit::new("Submarine", CivId(1), UnitClass::Ranged, UnitDomain::Water)
            .with_unique(Unique::new(UniqueType::Invisible));
        let combatant = Combatant::Unit(&sub);
        assert!(combatant.is_invisible_to(CivId(2)));
        assert!(!combatant.is_invisible_to(CivId(1)));
    }

    #[test]
    fn test_ranged_unit_attacks_with_ranged_strength() {
        let mut archer = MapUnit::new("Archer", CivId(1), UnitClass::Ranged, UnitDomain::Land);
        archer.strength = 5;
        archer.ranged_strength = 7;
        let combatant = Combatant::Unit(&archer);
        assert_eq!(combatant.attacking_strength(), 7);
        assert_eq!(combatant.defending_strength(), 5);
    }
}
