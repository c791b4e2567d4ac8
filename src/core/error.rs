use thiserror::Error;

use crate::core::types::UnitId;
use crate::map::hex::HexCoord;

#[derive(Error, Debug)]
pub enum WarpathError {
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Tile not found: {0:?}")]
    TileNotFound(HexCoord),

    /// An attack option points at a tile whose combatant cannot be resolved.
    /// The world-state layer guarantees occupied targets stay resolvable during a turn action.
    #[error("No combatant on target tile {0:?}")]
    MissingCombatant(HexCoord),

    #[error("Unit {unit} cannot move to {to:?}")]
    IllegalMove { unit: UnitId, to: HexCoord },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Rules error: {0}")]
    Rules(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WarpathError>;
