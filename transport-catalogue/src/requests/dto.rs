//! Data transfer objects for the JSON request document and its responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{BusInfo, Itinerary, Segment};
use crate::render::RenderSettings;
use crate::router::RoutingSettings;

/// A complete request document: network description, routing settings and
/// the queries to answer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Stops and buses making up the network
    pub base_requests: Vec<BaseRequest>,

    /// Wait time and bus velocity
    pub routing_settings: RoutingSettings,

    /// Size, palette and label styling of the map
    pub render_settings: RenderSettings,

    /// Queries, answered in order
    pub stat_requests: Vec<StatRequest>,
}

/// One element of the network description.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

/// A stop with its declared road distances to neighbouring stops.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Road distance in metres from this stop to each named stop
    #[serde(default)]
    pub road_distances: BTreeMap<String, f64>,
}

/// A bus route.
#[derive(Debug, Clone, Deserialize)]
pub struct BusRequest {
    pub name: String,

    /// Stops in travel order; one way only unless `is_roundtrip`
    pub stops: Vec<String>,

    /// Whether the route already returns to its first stop
    pub is_roundtrip: bool,
}

/// A query with the id its answer is tagged with.
#[derive(Debug, Clone, Deserialize)]
pub struct StatRequest {
    pub id: i64,

    #[serde(flatten)]
    pub query: StatQuery,
}

/// The queries the catalogue can answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatQuery {
    /// Route statistics for a bus
    Bus { name: String },
    /// Buses serving a stop
    Stop { name: String },
    /// Fastest itinerary between two stops
    Route { from: String, to: String },
    /// SVG map of the whole network
    Map,
}

/// Answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatResponse {
    pub request_id: i64,

    #[serde(flatten)]
    pub body: ResponseBody,
}

/// Payload of an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Bus(BusStats),
    Stop(StopBuses),
    Route(RouteResult),
    Map(MapImage),
    Error(ErrorMessage),
}

/// Route statistics for a bus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStats {
    pub curvature: f64,

    /// Metres; written as an integer when it is a whole number
    #[serde(serialize_with = "serialize_length")]
    pub route_length: f64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

/// Buses serving a stop, sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopBuses {
    pub buses: Vec<String>,
}

/// A fastest itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Total time in minutes
    pub total_time: f64,

    /// Waits and rides in order
    pub items: Vec<RouteItem>,
}

/// A step of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

/// The rendered network map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapImage {
    /// Complete SVG document
    pub map: String,
}

/// Query failure message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub error_message: String,
}

impl ErrorMessage {
    /// The answer to any query about something that does not exist.
    pub fn not_found() -> Self {
        Self {
            error_message: "not found".to_string(),
        }
    }
}

/// Largest magnitude below which every whole `f64` converts to `i64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_length<S: Serializer>(length: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if length.fract() == 0.0 && length.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*length as i64)
    } else {
        serializer.serialize_f64(*length)
    }
}

// Conversion implementations

impl From<BusInfo> for BusStats {
    fn from(info: BusInfo) -> Self {
        Self {
            curvature: info.curvature,
            route_length: info.route_length,
            stop_count: info.stops_on_route,
            unique_stop_count: info.unique_stops,
        }
    }
}

impl From<&Segment> for RouteItem {
    fn from(segment: &Segment) -> Self {
        match segment {
            Segment::Wait(wait) => RouteItem::Wait {
                stop_name: wait.stop.to_string(),
                time: wait.duration,
            },
            Segment::Ride(ride) => RouteItem::Bus {
                bus: ride.bus.to_string(),
                span_count: ride.span_count,
                time: ride.duration,
            },
        }
    }
}

impl From<&Itinerary> for RouteResult {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            total_time: itinerary.total_time(),
            items: itinerary.segments().iter().map(RouteItem::from).collect(),
        }
    }
}
