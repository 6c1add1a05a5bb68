//! Distance bookkeeping between pairs of stops.
//!
//! Two cost models live side by side:
//!
//! - **Road distance**: the declared distance for the direction of travel,
//!   falling back to the declared distance for the opposite direction, and
//!   finally to the great-circle distance.
//! - **Great-circle distance**: straight-line distance on the sphere.
//!
//! Both are memoized per ordered stop pair the first time they are resolved
//! and never recomputed afterwards.

use std::collections::HashMap;

use crate::geo::{Coordinates, great_circle_distance};
use crate::ids::StopId;

type StopPair = (StopId, StopId);

#[derive(Debug, Default)]
pub(crate) struct DistanceTable {
    /// Distances exactly as declared, keyed in the declared direction.
    declared: HashMap<StopPair, f64>,
    /// Resolved road distances.
    road: HashMap<StopPair, f64>,
    /// Resolved great-circle distances.
    geo: HashMap<StopPair, f64>,
}

impl DistanceTable {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declared distance for one direction.
    ///
    /// Returns `true` if the pair had already been resolved, in which case
    /// the memoized value is kept.
    pub fn declare(&mut self, from: StopId, to: StopId, distance: f64) -> bool {
        self.declared.insert((from, to), distance);
        self.road.contains_key(&(from, to)) || self.road.contains_key(&(to, from))
    }

    /// Declared distance for the direction of travel, or for the reverse
    /// direction when only that one was declared.
    pub fn declared(&self, from: StopId, to: StopId) -> Option<f64> {
        self.declared
            .get(&(from, to))
            .or_else(|| self.declared.get(&(to, from)))
            .copied()
    }

    /// Memoized road distance, if this pair was resolved before.
    pub fn cached_road(&self, from: StopId, to: StopId) -> Option<f64> {
        self.road.get(&(from, to)).copied()
    }

    /// Memoized great-circle distance, if this pair was resolved before.
    pub fn cached_geo(&self, from: StopId, to: StopId) -> Option<f64> {
        self.geo.get(&(from, to)).copied()
    }

    /// Resolve and memoize the road distance for a pair.
    pub fn resolve_road(
        &mut self,
        from: (StopId, Coordinates),
        to: (StopId, Coordinates),
    ) -> f64 {
        let key = (from.0, to.0);
        if let Some(&distance) = self.road.get(&key) {
            return distance;
        }

        let distance = match self.declared(from.0, to.0) {
            Some(declared) => declared,
            None => self.resolve_geo(from, to),
        };
        self.road.insert(key, distance);
        distance
    }

    /// Resolve and memoize the great-circle distance for a pair.
    pub fn resolve_geo(&mut self, from: (StopId, Coordinates), to: (StopId, Coordinates)) -> f64 {
        *self
            .geo
            .entry((from.0, to.0))
            .or_insert_with(|| great_circle_distance(from.1, to.1))
    }

    #[cfg(test)]
    pub fn declared_count(&self) -> usize {
        self.declared.len()
    }
}
