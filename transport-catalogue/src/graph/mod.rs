//! Generic directed weighted graph and shortest-path engine.
//!
//! Nothing in this module knows about stops or buses: vertices and edges are
//! dense integer ids, and callers keep their own tables mapping ids back to
//! domain meaning.

mod dijkstra;
mod weighted;

pub use crate::ids::{EdgeId, VertexId};
pub use dijkstra::{RouteInfo, ShortestPathTree, Weight, shortest_route};
pub use weighted::{DirectedWeightedGraph, Edge};
