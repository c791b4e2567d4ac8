//! The world the targeting engine reasons about
//!
//! `traits` defines the seams; `state::GameState` is the in-memory world
//! behind them, loaded from TOML scenarios by `scenario`.

pub mod pathfinding;
pub mod scenario;
pub mod state;
pub mod traits;
pub mod visibility;

pub use pathfinding::{reachable_within, ReachEntry, ReachableTiles};
pub use scenario::{Scenario, ScenarioError};
pub use state::GameState;
pub use traits::{DamageModel, GameWorld, UnitMovement, WorldActions, WorldQuery};
