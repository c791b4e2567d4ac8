pub mod config;
pub mod error;
pub mod types;

pub use config::{CombatConfig, TargetingConfig};
pub use error::{Result, WarpathError};
pub use types::{CityId, CivId, Turn, UnitId};
