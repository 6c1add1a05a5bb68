//! Transport catalogue and router.
//!
//! Stores bus stops and bus routes, answers statistics about them, and finds
//! the fastest bus itinerary between two stops given a fixed wait time at
//! every boarding and a constant bus velocity.

pub mod catalogue;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod ids;
pub mod logging;
pub mod render;
pub mod requests;
pub mod router;
pub mod web;
