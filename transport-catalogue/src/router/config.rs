//! Routing configuration for the transport router.

use serde::Deserialize;

/// Error returned when routing settings cannot produce a valid graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// Wait time is negative or not a number
    #[error("bus wait time must be a non-negative number of minutes, got {0}")]
    InvalidWaitTime(f64),

    /// Velocity is zero, negative or not a number
    #[error("bus velocity must be a positive number of km/h, got {0}")]
    InvalidVelocity(f64),
}

/// Configuration parameters for route building.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Time spent waiting for any bus at a stop (minutes).
    pub bus_wait_time: f64,

    /// Average bus speed (km/h).
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create a new configuration with the given parameters.
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Check that every edge weight derived from these settings is
    /// non-negative and finite.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(SettingsError::InvalidWaitTime(self.bus_wait_time));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(SettingsError::InvalidVelocity(self.bus_velocity));
        }
        Ok(())
    }

    /// Minutes needed to drive `distance_m` metres at the configured velocity.
    pub fn travel_minutes(&self, distance_m: f64) -> f64 {
        distance_m * 60.0 / (self.bus_velocity * 1000.0)
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}
