//! Compiles a frozen catalogue into a weighted route graph.
//!
//! Every stop owns two vertices: `begin`, where a passenger arrives, and
//! `end`, from which buses depart. The `begin -> end` edge carries the wait
//! time, so a change of bus always costs one wait. Ride edges go from the
//! `end` vertex of the boarding stop to the `begin` vertex of the alighting
//! stop, one edge for every ordered pair of positions on a route.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::catalogue::TransportCatalogue;
use crate::domain::{Ride, Segment, Wait};
use crate::graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
use crate::ids::StopId;

use super::config::{RoutingSettings, SettingsError};

/// The pair of vertices modelling one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopVertices {
    /// Arrival vertex; routes start and finish here.
    pub begin: VertexId,
    /// Departure vertex, reached after waiting.
    pub end: VertexId,
}

impl StopVertices {
    fn for_stop(stop: StopId) -> Self {
        Self {
            begin: VertexId::from_index(stop.index() * 2),
            end: VertexId::from_index(stop.index() * 2 + 1),
        }
    }
}

/// Immutable route graph plus the tables that give its ids domain meaning.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    graph: DirectedWeightedGraph<f64>,
    stop_vertices: HashMap<Arc<str>, StopVertices>,
    /// Decoded segment for every edge, indexed by `EdgeId`.
    segments: Vec<Segment>,
}

impl RouteGraph {
    /// Build the graph for every stop and bus in the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the settings would produce negative or non-finite
    /// edge weights.
    pub fn build(
        catalogue: &TransportCatalogue,
        settings: &RoutingSettings,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut builder = Self {
            graph: DirectedWeightedGraph::new(catalogue.stop_count() * 2),
            stop_vertices: HashMap::with_capacity(catalogue.stop_count()),
            segments: Vec::new(),
        };
        builder.add_waits(catalogue, settings);
        builder.add_rides(catalogue, settings);

        debug!(
            vertices = builder.graph.vertex_count(),
            edges = builder.graph.edge_count(),
            "built route graph"
        );
        Ok(builder)
    }

    fn add_waits(&mut self, catalogue: &TransportCatalogue, settings: &RoutingSettings) {
        for stop in catalogue.stops() {
            let vertices = StopVertices::for_stop(stop.id());
            self.stop_vertices
                .insert(stop.shared_name().clone(), vertices);
            self.push_edge(
                vertices.begin,
                vertices.end,
                Segment::Wait(Wait::new(
                    stop.shared_name().clone(),
                    settings.bus_wait_time,
                )),
            );
        }
    }

    fn add_rides(&mut self, catalogue: &TransportCatalogue, settings: &RoutingSettings) {
        for bus in catalogue.buses() {
            let stops = bus.stops();
            for (i, &board) in stops.iter().enumerate() {
                let from = StopVertices::for_stop(board).end;
                let mut distance = 0.0;

                for j in (i + 1)..stops.len() {
                    distance += catalogue.road_distance(stops[j - 1], stops[j]);
                    let time = settings.travel_minutes(distance);
                    let to = StopVertices::for_stop(stops[j]).begin;

                    self.push_edge(
                        from,
                        to,
                        Segment::Ride(Ride::new(bus.shared_name().clone(), j - i, time)),
                    );
                }
            }
        }
    }

    fn push_edge(&mut self, from: VertexId, to: VertexId, segment: Segment) -> EdgeId {
        debug_assert!(
            segment.duration().is_finite() && segment.duration() >= 0.0,
            "edge {from} -> {to} has weight {}",
            segment.duration()
        );
        let id = self.graph.add_edge(Edge {
            from,
            to,
            weight: segment.duration(),
        });
        debug_assert_eq!(id.index(), self.segments.len());
        self.segments.push(segment);
        id
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<f64> {
        &self.graph
    }

    /// Vertices of the stop with this name.
    pub fn vertices(&self, stop: &str) -> Option<StopVertices> {
        self.stop_vertices.get(stop).copied()
    }

    /// The segment an edge stands for.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this graph.
    pub fn segment(&self, edge: EdgeId) -> &Segment {
        &self.segments[edge.index()]
    }
}
