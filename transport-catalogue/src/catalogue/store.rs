//! The transport catalogue: canonical stop and bus records.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Bus, BusInfo, CatalogueError, Stop};
use crate::geo::{Coordinates, great_circle_distance};
use crate::ids::{BusId, StopId};

use super::distances::DistanceTable;

/// Owns every stop and bus of the network.
///
/// Stops and buses live in dense arenas indexed by [`StopId`] / [`BusId`];
/// names are interned once and shared with everything that refers to them.
/// Records are never mutated or removed after insertion.
///
/// Build order matters: declare road distances before adding the buses that
/// travel them, since a bus's route length is computed when it is added.
#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<Arc<str>, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<Arc<str>, BusId>,
    /// Names of the buses serving each stop, indexed by `StopId`.
    buses_at_stop: Vec<BTreeSet<Arc<str>>>,
    distances: DistanceTable,
}

impl TransportCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::DuplicateStop`] if the name is taken, or
    /// [`CatalogueError::InvalidCoordinates`] if the coordinates are not a
    /// point on the globe; the catalogue is left unchanged.
    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates) -> Result<StopId, CatalogueError> {
        if !coordinates.is_valid() {
            return Err(CatalogueError::InvalidCoordinates {
                stop: name.to_string(),
                lat: coordinates.lat,
                lng: coordinates.lng,
            });
        }

        let id = StopId::from_index(self.stops.len());
        let name: Arc<str> = Arc::from(name);

        match self.stop_index.entry(name.clone()) {
            Entry::Occupied(_) => return Err(CatalogueError::DuplicateStop(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        self.stops.push(Stop::new(id, name, coordinates));
        self.buses_at_stop.push(BTreeSet::new());
        Ok(id)
    }

    /// Record the declared road distance from one stop to another.
    ///
    /// Returns `false` (and records nothing) if either stop is unknown or the
    /// distance is negative or not finite.
    pub fn add_distance(&mut self, from: &str, to: &str, distance: f64) -> bool {
        if !distance.is_finite() || distance < 0.0 {
            warn!(from, to, distance, "ignoring invalid distance");
            return false;
        }

        let (Some(from_id), Some(to_id)) = (self.stop_id(from), self.stop_id(to)) else {
            warn!(from, to, "ignoring distance between unknown stops");
            return false;
        };

        if self.distances.declare(from_id, to_id, distance) {
            warn!(
                from,
                to, "distance declared after a bus already used this pair; keeping earlier value"
            );
        }
        true
    }

    /// Register a bus route.
    ///
    /// `stops` is the stop sequence as published: for a roundtrip it already
    /// returns to its first stop, for a linear route it is one way only and is
    /// expanded here to include the way back.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the name is taken, the stop list is empty, or a stop
    /// is unknown. The catalogue is left unchanged on error.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stops: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId, CatalogueError> {
        if self.bus_index.contains_key(name) {
            return Err(CatalogueError::DuplicateBus(name.to_string()));
        }
        if stops.is_empty() {
            return Err(CatalogueError::EmptyRoute(name.to_string()));
        }

        let published = stops
            .iter()
            .map(|stop| {
                self.stop_id(stop.as_ref())
                    .ok_or_else(|| CatalogueError::UnknownStop {
                        bus: name.to_string(),
                        stop: stop.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let closed = Bus::close_route(&published, is_roundtrip);

        let mut route_length = 0.0;
        let mut geo_length = 0.0;
        for pair in closed.windows(2) {
            let from = (pair[0], self.stops[pair[0].index()].coordinates());
            let to = (pair[1], self.stops[pair[1].index()].coordinates());
            route_length += self.distances.resolve_road(from, to);
            geo_length += self.distances.resolve_geo(from, to);
        }

        let id = BusId::from_index(self.buses.len());
        let name: Arc<str> = Arc::from(name);

        for stop in &closed {
            self.buses_at_stop[stop.index()].insert(name.clone());
        }

        debug!(
            bus = %name,
            stops = closed.len(),
            route_length,
            "added bus"
        );

        self.bus_index.insert(name.clone(), id);
        self.buses
            .push(Bus::new(id, name, closed, is_roundtrip, route_length, geo_length));
        Ok(id)
    }

    /// Look up a stop by name.
    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| &self.stops[id.index()])
    }

    /// Look up a bus by name.
    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_index.get(name).map(|id| &self.buses[id.index()])
    }

    /// Route statistics for a bus, or `None` if no such bus exists.
    pub fn bus_info(&self, name: &str) -> Option<BusInfo> {
        self.find_bus(name).map(Bus::info)
    }

    /// Names of the buses passing through a stop, sorted.
    ///
    /// Empty for unknown stops and for stops no bus visits; use
    /// [`find_stop`](Self::find_stop) to tell the two apart.
    pub fn buses_at_stop(&self, name: &str) -> BTreeSet<&str> {
        self.stop_id(name)
            .map(|id| {
                self.buses_at_stop[id.index()]
                    .iter()
                    .map(|bus| bus.as_ref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Road distance from one stop to another, in metres.
    ///
    /// Uses the declared distance for this direction, else the declared
    /// distance for the opposite direction, else the great-circle distance.
    /// Returns `None` if either stop is unknown.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.stop_id(from)?;
        let to = self.stop_id(to)?;
        Some(self.road_distance(from, to))
    }

    /// Road distance between two catalogue stops, in metres.
    ///
    /// Pairs travelled by some bus are answered from the memo table.
    ///
    /// # Panics
    ///
    /// Panics if either id did not come from this catalogue.
    pub fn road_distance(&self, from: StopId, to: StopId) -> f64 {
        if let Some(distance) = self.distances.cached_road(from, to) {
            return distance;
        }
        match self.distances.declared(from, to) {
            Some(declared) => declared,
            None => self.geo_distance(from, to),
        }
    }

    /// Great-circle distance between two catalogue stops, in metres.
    ///
    /// # Panics
    ///
    /// Panics if either id did not come from this catalogue.
    pub fn geo_distance(&self, from: StopId, to: StopId) -> f64 {
        self.distances.cached_geo(from, to).unwrap_or_else(|| {
            great_circle_distance(
                self.stops[from.index()].coordinates(),
                self.stops[to.index()].coordinates(),
            )
        })
    }

    /// Id of the stop with this name.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    /// The stop with this id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this catalogue.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    /// All stops, in insertion order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses, in insertion order.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }
}
