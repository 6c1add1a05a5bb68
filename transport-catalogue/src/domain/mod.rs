//! Domain types for the transport catalogue.
//!
//! Stops and buses are created once by the catalogue and never mutated;
//! itineraries are produced fresh for every route query.

mod bus;
mod error;
mod itinerary;
mod stop;

pub use bus::{Bus, BusInfo};
pub use error::CatalogueError;
pub use itinerary::{Itinerary, Ride, Segment, Wait};
pub use stop::Stop;
