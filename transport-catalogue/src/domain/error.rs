//! Domain error types.
//!
//! These errors represent malformed construction input rejected by the
//! catalogue. Lookups of unknown names are not errors; they return `None`.

/// Construction-time failures when populating a catalogue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogueError {
    /// A stop with this name is already registered
    #[error("duplicate stop: {0}")]
    DuplicateStop(String),

    /// A bus with this name is already registered
    #[error("duplicate bus: {0}")]
    DuplicateBus(String),

    /// A bus references a stop that was never added
    #[error("bus {bus} references unknown stop {stop}")]
    UnknownStop { bus: String, stop: String },

    /// A stop's coordinates are not finite or out of range
    #[error("stop {stop} has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { stop: String, lat: f64, lng: f64 },

    /// A bus was declared without any stops
    #[error("bus {0} has no stops")]
    EmptyRoute(String),
}
