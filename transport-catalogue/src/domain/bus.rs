//! Bus route records and route statistics.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ids::{BusId, StopId};

/// A named bus route.
///
/// # Invariants
///
/// - `stops` is never empty
/// - `stops` is always a closed path: a linear route is stored with its
///   return leg appended (`A B C` becomes `A B C B A`)
/// - `route_length` and `geo_length` are computed over `stops` at
///   construction and never change
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    id: BusId,
    name: Arc<str>,
    stops: Vec<StopId>,
    is_roundtrip: bool,
    route_length: f64,
    geo_length: f64,
}

impl Bus {
    pub(crate) fn new(
        id: BusId,
        name: Arc<str>,
        stops: Vec<StopId>,
        is_roundtrip: bool,
        route_length: f64,
        geo_length: f64,
    ) -> Self {
        Self {
            id,
            name,
            stops,
            is_roundtrip,
            route_length,
            geo_length,
        }
    }

    /// Expands a one-way stop sequence into the closed path a linear bus
    /// actually drives: there and back again, without repeating the turnaround.
    pub fn close_route(stops: &[StopId], is_roundtrip: bool) -> Vec<StopId> {
        if is_roundtrip || stops.len() < 2 {
            return stops.to_vec();
        }

        let mut closed = Vec::with_capacity(stops.len() * 2 - 1);
        closed.extend_from_slice(stops);
        closed.extend(stops.iter().rev().skip(1));
        closed
    }

    pub fn id(&self) -> BusId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the interned name.
    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// The closed stop sequence.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn is_roundtrip(&self) -> bool {
        self.is_roundtrip
    }

    /// Sum of road distances along the closed sequence, in metres.
    pub fn route_length(&self) -> f64 {
        self.route_length
    }

    /// Sum of great-circle distances along the closed sequence, in metres.
    pub fn geo_length(&self) -> f64 {
        self.geo_length
    }

    /// Route statistics for this bus.
    pub fn info(&self) -> BusInfo {
        let unique_stops = self.stops.iter().collect::<HashSet<_>>().len();

        // Degenerate routes whose stops all coincide have no straight-line length
        let curvature = if self.geo_length > 0.0 {
            self.route_length / self.geo_length
        } else {
            1.0
        };

        BusInfo {
            stops_on_route: self.stops.len(),
            unique_stops,
            route_length: self.route_length,
            curvature,
        }
    }
}

/// Statistics reported for a bus route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BusInfo {
    /// Number of positions in the closed stop sequence.
    pub stops_on_route: usize,
    /// Number of distinct stops.
    pub unique_stops: usize,
    /// Road length in metres.
    pub route_length: f64,
    /// Road length divided by great-circle length.
    pub curvature: f64,
}
