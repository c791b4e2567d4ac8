//! Rule modifiers ("uniques") attached to units
//!
//! Behavior that differs between unit types is expressed as a set of tagged
//! modifiers with optional parameters, looked up by tag. Code never inspects
//! a unit's type name to decide what it may do.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueType {
    /// Never initiates combat
    CannotAttack,
    /// Pays setup movement before firing unless already set up
    MustSetUp,
    /// Fires over obstacles at anything within range
    IndirectFire,
    /// May attack while embarked, including water targets
    AttackOnSea,
    /// Land melee unit allowed to strike across water
    LandUnitEmbarkation,
    /// Params: unit categories this unit may target
    CanOnlyAttackUnits,
    /// Params: tile filters this unit may target
    CanOnlyAttackTiles,
    /// Hidden from other civilizations unless revealed
    Invisible,
    /// Reveals invisible units within its vision
    CanSeeInvisible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unique {
    pub kind: UniqueType,
    #[serde(default)]
    pub params: Vec<String>,
}

impl Unique {
    pub fn new(kind: UniqueType) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(kind: UniqueType, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// First parameter, the filter for the `CanOnlyAttack*` kinds
    pub fn filter(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// Capability set of a unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueSet {
    uniques: Vec<Unique>,
}

impl UniqueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: UniqueType) -> bool {
        self.uniques.iter().any(|u| u.kind == kind)
    }

    /// Every modifier of the given kind (a unit may carry several filters)
    pub fn matching(&self, kind: UniqueType) -> impl Iterator<Item = &Unique> + '_ {
        self.uniques.iter().filter(move |u| u.kind == kind)
    }

    pub fn insert(&mut self, unique: Unique) {
        if !self.uniques.contains(&unique) {
            self.uniques.push(unique);
        }
    }

    pub fn len(&self) -> usize {
        self.uniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniques.is_empty()
    }
}

impl FromIterator<Unique> for UniqueSet {
    fn from_iter<T: IntoIterator<Item = Unique>>(iter: T) -> Self {
        let mut set = UniqueSet::new();
        for unique in iter {
            set.insert(unique);
        }
        set
    }
}
