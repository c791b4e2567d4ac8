//! Targeting and combat configuration with documented constants
//!
//! Every tunable used by the target selection engine and the reference
//! combat model lives here. Configs are passed explicitly to the code that
//! needs them; there is no global instance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarpathError};

/// Configuration for attack option enumeration and target choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Movement that must remain after reaching a launch tile
    ///
    /// Launch tiles leaving `movement_epsilon` or less are dropped, so a unit
    /// never plans an attack it would arrive at with a zero budget.
    pub movement_epsilon: f32,

    /// Movement spent setting up before a `MustSetUp` unit may fire
    pub setup_cost: f32,

    /// City health at which a melee unit captures on its next hit
    pub capturable_city_health: u32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            movement_epsilon: 0.05,
            setup_cost: 1.0,
            capturable_city_health: 1,
        }
    }
}

impl TargetingConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.movement_epsilon > 0.0 && self.movement_epsilon < 1.0) {
            return Err(WarpathError::Config(format!(
                "movement_epsilon ({}) must be in (0, 1)",
                self.movement_epsilon
            )));
        }
        if self.setup_cost < 0.0 {
            return Err(WarpathError::Config(format!(
                "setup_cost ({}) must not be negative",
                self.setup_cost
            )));
        }
        if self.capturable_city_health == 0 {
            return Err(WarpathError::Config(
                "capturable_city_health must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the reference strength-based combat model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Damage dealt between two equally strong, fully healthy combatants
    pub base_damage: f32,

    /// Fractional spread applied to resolved (not predicted) damage
    ///
    /// At 0.2, resolved damage lands within 80%..120% of the prediction.
    pub damage_spread: f32,

    /// Seed for the combat RNG so replays are deterministic
    pub seed: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_damage: 30.0,
            damage_spread: 0.2,
            seed: 42,
        }
    }
}

impl CombatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.base_damage <= 0.0 {
            return Err(WarpathError::Config("base_damage must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.damage_spread) {
            return Err(WarpathError::Config(format!(
                "damage_spread ({}) must be in [0, 1)",
                self.damage_spread
            )));
        }
        Ok(())
    }
}
