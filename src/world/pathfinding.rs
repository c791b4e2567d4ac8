//! Reachability within a single turn
//!
//! Dijkstra over terrain movement costs, bounded by the unit's remaining
//! movement. A unit with any movement left may always step onto an
//! enterable neighbor; the step then costs whatever movement remains.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::map::hex::HexCoord;

/// How a tile was reached this turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReachEntry {
    /// Movement spent getting here
    pub total_distance: f32,
    /// Previous tile on the cheapest path (None for the start tile)
    pub parent: Option<HexCoord>,
}

/// Tiles enterable this turn, in the order they were settled (cheapest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReachableTiles {
    entries: Vec<(HexCoord, ReachEntry)>,
}

impl ReachableTiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<(HexCoord, ReachEntry)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(HexCoord, ReachEntry)> {
        self.entries.iter()
    }

    pub fn get(&self, coord: HexCoord) -> Option<&ReachEntry> {
        self.entries.iter().find(|(c, _)| *c == coord).map(|(_, e)| e)
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.get(coord).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path from the start tile to `goal`, inclusive
    pub fn path_to(&self, goal: HexCoord) -> Option<Vec<HexCoord>> {
        let mut path = vec![goal];
        let mut current = self.get(goal)?;
        while let Some(parent) = current.parent {
            path.push(parent);
            current = self.get(parent)?;
        }
        path.reverse();
        Some(path)
    }
}

/// Compute every tile reachable from `start` within `budget` movement
///
/// `step_cost(from, to)` returns the movement needed to enter `to` from
/// `from`, or None when the unit cannot pass through `to`.
pub fn reachable_within<F>(start: HexCoord, budget: f32, step_cost: F) -> ReachableTiles
where
    F: Fn(HexCoord, HexCoord) -> Option<f32>,
{
    let mut best: AHashMap<HexCoord, ReachEntry> = AHashMap::new();
    let mut settled = Vec::new();
    let mut done = AHashSet::new();
    let mut open = BinaryHeap::new();

    best.insert(
        start,
        ReachEntry {
            total_distance: 0.0,
            parent: None,
        },
    );
    open.push(Reverse((OrderedFloat(0.0_f32), start)));

    while let Some(Reverse((OrderedFloat(cost), coord))) = open.pop() {
        let Some(entry) = best.get(&coord).copied() else {
            continue;
        };
        // Stale heap entry
        if cost > entry.total_distance {
            continue;
        }
        if !done.insert(coord) {
            continue;
        }
        settled.push((coord, entry));

        if cost >= budget {
            continue;
        }

        for neighbor in coord.neighbors() {
            let Some(step) = step_cost(coord, neighbor) else {
                continue;
            };
            if !step.is_finite() {
                continue;
            }
            let tentative = (cost + step).min(budget);
            let improves = best
                .get(&neighbor)
                .map_or(true, |existing| tentative < existing.total_distance);
            if improves {
                best.insert(
                    neighbor,
                    ReachEntry {
                        total_distance: tentative,
                        parent: Some(coord),
                    },
                );
                open.push(Reverse((OrderedFloat(tentative), neighbor)));
            }
        }
    }

    ReachableTiles::from_entries(settled)
}
