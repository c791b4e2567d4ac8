//! Warpath - combat target selection for AI-controlled units
//!
//! Given a unit with finite movement and attack range, decide which enemy
//! tiles it could legally strike this turn, pick one, and carry out the
//! move and attack against the world.

pub mod automation;
pub mod civ;
pub mod combat;
pub mod core;
pub mod map;
pub mod rules;
pub mod units;
pub mod world;

pub use automation::{AttackOption, BattleHelper};
pub use core::{Result, WarpathError};
pub use world::GameState;
