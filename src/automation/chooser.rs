//! Pick one attack out of many
//!
//! Priority, first non-empty tier wins:
//! 1. a melee attacker takes a city that is one hit from falling
//! 2. the weakest enemy unit
//! 3. the weakest city (a city at capture health is left alone here, since
//!    only melee can take it and a ranged hit cannot finish it)

use crate::automation::attackable::AttackOption;
use crate::core::config::TargetingConfig;
use crate::core::error::{Result, WarpathError};
use crate::units::unit::MapUnit;
use crate::world::traits::WorldQuery;

/// Best option for `unit`, or None when `options` is empty
///
/// Ties go to the earliest option in input order.
pub fn choose_target<W>(
    world: &W,
    unit: &MapUnit,
    options: &[AttackOption],
    config: &TargetingConfig,
) -> Result<Option<AttackOption>>
where
    W: WorldQuery + ?Sized,
{
    let mut city_options = Vec::new();
    let mut unit_options = Vec::new();

    for option in options {
        let tile = world
            .tile(option.target)
            .ok_or(WarpathError::TileNotFound(option.target))?;
        let defender = world
            .combatant_at(option.target)
            .ok_or(WarpathError::MissingCombatant(option.target))?;
        if tile.is_city_center() {
            city_options.push((*option, defender.health()));
        } else {
            unit_options.push((*option, defender.health()));
        }
    }

    let capturable = config.capturable_city_health;

    if unit.is_melee() {
        if let Some((option, _)) = city_options.iter().find(|(_, health)| *health == capturable) {
            tracing::debug!(unit = %unit.id, target = ?option.target, "going for city capture");
            return Ok(Some(*option));
        }
    }

    if let Some((option, _)) = unit_options.iter().min_by_key(|(_, health)| *health) {
        return Ok(Some(*option));
    }

    Ok(city_options
        .iter()
        .filter(|(_, health)| *health != capturable)
        .min_by_key(|(_, health)| *health)
        .map(|(option, _)| *option))
}
