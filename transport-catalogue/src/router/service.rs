//! Route queries: stop names in, itineraries out.

use tracing::trace;

use crate::catalogue::TransportCatalogue;
use crate::domain::Itinerary;
use crate::graph::{RouteInfo, shortest_route};

use super::builder::RouteGraph;
use super::config::{RoutingSettings, SettingsError};

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// One of the endpoints is not a catalogue stop
    #[error("unknown stop: {0}")]
    UnknownStop(String),
}

/// Answers "fastest way from stop A to stop B" over an immutable route graph.
///
/// The router owns everything it needs (interned names are shared with the
/// catalogue), so it outlives the borrow of the catalogue it was built from
/// and can be queried from many threads at once.
#[derive(Debug, Clone)]
pub struct TransportRouter {
    settings: RoutingSettings,
    graph: RouteGraph,
}

impl TransportRouter {
    /// Compile the catalogue into a route graph.
    ///
    /// The catalogue must be fully populated; later additions are not seen.
    pub fn new(
        catalogue: &TransportCatalogue,
        settings: RoutingSettings,
    ) -> Result<Self, SettingsError> {
        let graph = RouteGraph::build(catalogue, &settings)?;
        Ok(Self { settings, graph })
    }

    /// Find the fastest itinerary from one stop to another.
    ///
    /// Returns `Ok(None)` when both stops exist but no sequence of buses
    /// connects them. A stop to itself is `Ok(Some(Itinerary::stay()))`: zero
    /// time, no segments.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownStop`] if either name is not a stop.
    pub fn build_route(&self, from: &str, to: &str) -> Result<Option<Itinerary>, RouteError> {
        let source = self
            .graph
            .vertices(from)
            .ok_or_else(|| RouteError::UnknownStop(from.to_string()))?;
        let target = self
            .graph
            .vertices(to)
            .ok_or_else(|| RouteError::UnknownStop(to.to_string()))?;

        let Some(route) = shortest_route(self.graph.graph(), source.begin, target.begin) else {
            trace!(from, to, "no route");
            return Ok(None);
        };

        trace!(
            from,
            to,
            total_time = route.weight,
            edges = route.edges.len(),
            "route found"
        );
        Ok(Some(self.decode(route)))
    }

    fn decode(&self, route: RouteInfo<f64>) -> Itinerary {
        let segments = route
            .edges
            .iter()
            .map(|&edge| self.graph.segment(edge).clone())
            .collect();
        Itinerary::new(route.weight, segments)
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn route_graph(&self) -> &RouteGraph {
        &self.graph
    }
}
