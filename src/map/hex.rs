//! Hex coordinate system for the world map (axial coordinates)
//!
//! Uses axial coordinates (q, r); the cube coordinate s is derived.

use serde::{Deserialize, Serialize};

/// Axial hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Number of hex steps between two coordinates
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }

    /// The 6 neighboring coordinates
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),
            HexCoord::new(self.q + 1, self.r - 1),
            HexCoord::new(self.q, self.r - 1),
            HexCoord::new(self.q - 1, self.r),
            HexCoord::new(self.q - 1, self.r + 1),
            HexCoord::new(self.q, self.r + 1),
        ]
    }

    /// Coordinates on the straight line from self to other (inclusive)
    pub fn line_to(&self, other: &Self) -> Vec<HexCoord> {
        let n = self.distance(other) as i32;
        if n == 0 {
            return vec![*self];
        }

        // Nudge off exact hex edges so ties round consistently
        let (q0, r0) = (self.q as f32 + 1e-6, self.r as f32 + 1e-6);
        let (q1, r1) = (other.q as f32 + 1e-6, other.r as f32 + 1e-6);

        (0..=n)
            .map(|i| {
                let t = i as f32 / n as f32;
                Self::round(q0 + (q1 - q0) * t, r0 + (r1 - r0) * t)
            })
            .collect()
    }

    /// Round a fractional hex to the nearest integer hex
    fn round(q: f32, r: f32) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// All coordinates within `range` steps, including self
    pub fn within(&self, range: u32) -> Vec<HexCoord> {
        let range = range as i32;
        let mut results = Vec::with_capacity((3 * range * (range + 1) + 1) as usize);
        for dq in -range..=range {
            for dr in (-range).max(-dq - range)..=range.min(-dq + range) {
                results.push(HexCoord::new(self.q + dq, self.r + dr));
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same() {
        let a = HexCoord::new(3, 4);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_distance_diagonal() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(2, -1);
        assert_eq!(a.distance(&b), 2);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = HexCoord::new(5, 5);
        assert!(center.neighbors().iter().all(|n| center.is_adjacent(n)));
    }

    #[test]
    fn test_line_includes_endpoints() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(3, 0);
        let line = a.line_to(&b);
        assert_eq!(line.len(), 4);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
    }

    #[test]
    fn test_within_counts() {
        let center = HexCoord::new(0, 0);
        assert_eq!(center.within(0).len(), 1);
        assert_eq!(center.within(1).len(), 7);
        assert_eq!(center.within(2).len(), 19);
    }

    #[test]
    fn test_within_respects_distance() {
        let center = HexCoord::new(2, 2);
        assert!(center.within(3).iter().all(|c| center.distance(c) <= 3));
    }
}
