//! Civilizations and the war state between them

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::CivId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivId,
    pub name: String,
}

impl Civilization {
    pub fn new(id: CivId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Symmetric war relation between civilizations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diplomacy {
    wars: AHashSet<(CivId, CivId)>,
}

impl Diplomacy {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: CivId, b: CivId) -> (CivId, CivId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn declare_war(&mut self, a: CivId, b: CivId) {
        if a != b {
            self.wars.insert(Self::key(a, b));
        }
    }

    pub fn make_peace(&mut self, a: CivId, b: CivId) {
        self.wars.remove(&Self::key(a, b));
    }

    pub fn is_at_war(&self, a: CivId, b: CivId) -> bool {
        self.wars.contains(&Self::key(a, b))
    }
}
