//! Itinerary types.
//!
//! An `Itinerary` is the decoded answer to a route query: the total travel
//! time and the ordered list of waits and rides that achieve it. All
//! durations are in minutes.

use std::sync::Arc;

/// Waiting for a bus at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Wait {
    /// Stop where the wait happens
    pub stop: Arc<str>,
    /// Wait duration in minutes
    pub duration: f64,
}

impl Wait {
    pub fn new(stop: Arc<str>, duration: f64) -> Self {
        Self { stop, duration }
    }
}

/// Riding a bus over one or more consecutive road segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    /// Bus route name
    pub bus: Arc<str>,
    /// Number of road segments travelled without leaving the bus
    pub span_count: usize,
    /// Travel time in minutes
    pub duration: f64,
}

impl Ride {
    pub fn new(bus: Arc<str>, span_count: usize, duration: f64) -> Self {
        Self {
            bus,
            span_count,
            duration,
        }
    }
}

/// A step of an itinerary: either a wait or a ride.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Waiting at a stop
    Wait(Wait),
    /// Riding a bus
    Ride(Ride),
}

impl Segment {
    /// Returns the duration of this segment.
    pub fn duration(&self) -> f64 {
        match self {
            Segment::Wait(wait) => wait.duration,
            Segment::Ride(ride) => ride.duration,
        }
    }

    /// Returns true if this is a wait segment.
    pub fn is_wait(&self) -> bool {
        matches!(self, Segment::Wait(_))
    }

    /// Returns true if this is a ride segment.
    pub fn is_ride(&self) -> bool {
        matches!(self, Segment::Ride(_))
    }

    /// Returns the wait if this is a wait segment.
    pub fn as_wait(&self) -> Option<&Wait> {
        match self {
            Segment::Wait(wait) => Some(wait),
            Segment::Ride(_) => None,
        }
    }

    /// Returns the ride if this is a ride segment.
    pub fn as_ride(&self) -> Option<&Ride> {
        match self {
            Segment::Wait(_) => None,
            Segment::Ride(ride) => Some(ride),
        }
    }
}

/// A fastest way from one stop to another.
///
/// Segments alternate Wait, Ride, Wait, Ride, ... as produced by the router.
/// An itinerary between a stop and itself has no segments and zero time.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    total_time: f64,
    segments: Vec<Segment>,
}

impl Itinerary {
    /// Constructs an itinerary from decoded segments.
    pub fn new(total_time: f64, segments: Vec<Segment>) -> Self {
        Self {
            total_time,
            segments,
        }
    }

    /// The itinerary from a stop to itself.
    pub fn stay() -> Self {
        Self::new(0.0, Vec::new())
    }

    /// Total travel time in minutes.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if no travel is needed.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns all rides in order.
    pub fn rides(&self) -> impl Iterator<Item = &Ride> {
        self.segments.iter().filter_map(|s| s.as_ride())
    }

    /// Returns all waits in order.
    pub fn waits(&self) -> impl Iterator<Item = &Wait> {
        self.segments.iter().filter_map(|s| s.as_wait())
    }

    /// Returns the number of bus changes (rides - 1, or 0 for direct).
    pub fn change_count(&self) -> usize {
        self.rides().count().saturating_sub(1)
    }

    /// Returns the total time spent waiting.
    pub fn total_wait_time(&self) -> f64 {
        self.waits().map(|w| w.duration).sum()
    }
}
