//! Stop records.

use std::fmt;
use std::sync::Arc;

use crate::geo::Coordinates;
use crate::ids::StopId;

/// A named geographic point served by bus routes.
///
/// The name is interned: every structure that refers to the stop by name
/// (indices, graph tables, itinerary segments) shares this allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    id: StopId,
    name: Arc<str>,
    coordinates: Coordinates,
}

impl Stop {
    pub(crate) fn new(id: StopId, name: Arc<str>, coordinates: Coordinates) -> Self {
        Self {
            id,
            name,
            coordinates,
        }
    }

    /// Dense catalogue id, in insertion order.
    pub fn id(&self) -> StopId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the interned name.
    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.coordinates)
    }
}
