//! Combatants and the reference damage model

pub mod combatant;
pub mod damage;
pub mod log;

pub use combatant::Combatant;
pub use damage::StrengthDamageModel;
pub use log::{CombatLog, CombatOutcome, CombatRecord};
