//! Load unit rules from TOML files

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::rules::ruleset::{Ruleset, UnitDefinition};

/// Units shipped with the crate
pub const BUILTIN_UNITS: &str = include_str!("../../data/rules/units.toml");

/// Errors that can occur when loading rules
#[derive(Debug, Error)]
pub enum LoadError {
    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    /// Two definitions share a name
    #[error("Duplicate unit definition: {0}")]
    DuplicateUnit(String),
    /// A definition is internally inconsistent
    #[error("Invalid unit definition {name}: {reason}")]
    InvalidUnit { name: String, reason: String },
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct UnitsFile {
    #[serde(default)]
    units: Vec<UnitDefinition>,
}

/// Parse a ruleset from a TOML string
pub fn parse_ruleset(content: &str) -> Result<Ruleset, LoadError> {
    let file: UnitsFile = toml::from_str(content)?;
    let mut rules = Ruleset::new();

    for definition in file.units {
        validate_definition(&definition)?;
        if rules.get(&definition.name).is_some() {
            return Err(LoadError::DuplicateUnit(definition.name));
        }
        rules.insert(definition);
    }

    tracing::debug!(units = rules.len(), "ruleset parsed");
    Ok(rules)
}

/// Load a ruleset from a TOML file on disk
pub fn load_ruleset(path: &Path) -> Result<Ruleset, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_ruleset(&content)
}

/// The ruleset compiled into the crate
pub fn builtin_ruleset() -> Result<Ruleset, LoadError> {
    parse_ruleset(BUILTIN_UNITS)
}

fn validate_definition(def: &UnitDefinition) -> Result<(), LoadError> {
    let invalid = |reason: &str| LoadError::InvalidUnit {
        name: def.name.clone(),
        reason: reason.to_string(),
    };

    if def.name.trim().is_empty() {
        return Err(invalid("empty name"));
    }
    if !(def.movement > 0.0) {
        return Err(invalid("movement must be positive"));
    }
    if def.class.is_ranged() && def.ranged_strength == 0 {
        return Err(invalid("ranged unit without ranged_strength"));
    }
    if def.class.is_melee() && def.range.is_some_and(|r| r != 1) {
        return Err(invalid("melee units attack at range 1"));
    }
    Ok(())
}
