//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for civilizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivId(pub u32);

impl CivId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "civ#{}", self.0)
    }
}

/// Unique identifier for map units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", &self.0.simple().to_string()[..8])
    }
}

/// Unique identifier for cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityId(pub Uuid);

impl CityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game turn counter
pub type Turn = u32;
