//! Combat target selection for automated units
//!
//! - `legality`: may this attacker strike this tile?
//! - `attackable`: every (launch tile, target) pair reachable this turn
//! - `chooser`: the one target to prefer
//! - `battle_helper`: turn actions that act on the choice

pub mod attackable;
pub mod battle_helper;
pub mod chooser;
pub mod legality;

pub use attackable::{attackable_targets, AttackOption};
pub use battle_helper::BattleHelper;
pub use chooser::choose_target;
pub use legality::{is_attackable_enemy_tile, veto, Veto};
