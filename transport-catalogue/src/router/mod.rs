//! Fastest-route planning over the bus network.
//!
//! The catalogue is compiled once into a static graph (two vertices per
//! stop, a wait edge between them, and a ride edge for every boardable pair
//! of positions on every bus), after which route queries run Dijkstra and
//! decode the resulting edges back into waits and rides.

mod builder;
mod config;
mod service;

pub use builder::{RouteGraph, StopVertices};
pub use config::{RoutingSettings, SettingsError};
pub use service::{RouteError, TransportRouter};
