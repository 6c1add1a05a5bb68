//! Builds a catalogue and router from a request document and answers its
//! queries.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info, trace};

use crate::catalogue::TransportCatalogue;
use crate::domain::CatalogueError;
use crate::geo::Coordinates;
use crate::render::{MapRenderer, RenderSettings};
use crate::router::{RouteError, RoutingSettings, TransportRouter};

use super::dto::*;
use super::error::RequestError;

/// A populated catalogue together with its router.
///
/// Everything is immutable once built, so one handler can serve any number
/// of concurrent queries.
#[derive(Debug)]
pub struct RequestHandler {
    catalogue: TransportCatalogue,
    router: TransportRouter,
    renderer: MapRenderer,
}

impl RequestHandler {
    /// Build the network described by `base_requests` and compile its router.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base requests conflict (duplicate names, buses
    /// through unknown stops, bad coordinates) or the routing settings are
    /// out of range.
    pub fn new(
        base_requests: &[BaseRequest],
        settings: RoutingSettings,
        render_settings: RenderSettings,
    ) -> Result<Self, RequestError> {
        let catalogue = build_catalogue(base_requests)?;
        let router = TransportRouter::new(&catalogue, settings)?;
        let renderer = MapRenderer::new(render_settings);

        info!(
            stops = catalogue.stop_count(),
            buses = catalogue.bus_count(),
            "catalogue ready"
        );
        Ok(Self {
            catalogue,
            router,
            renderer,
        })
    }

    /// Build a handler from a parsed document, ignoring its stat requests.
    pub fn from_document(document: &Document) -> Result<Self, RequestError> {
        Self::new(
            &document.base_requests,
            document.routing_settings,
            document.render_settings.clone(),
        )
    }

    pub fn catalogue(&self) -> &TransportCatalogue {
        &self.catalogue
    }

    pub fn router(&self) -> &TransportRouter {
        &self.router
    }

    /// Statistics for a bus, or `None` if there is no such bus.
    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        self.catalogue.bus_info(name).map(BusStats::from)
    }

    /// Buses through a stop, or `None` if there is no such stop.
    ///
    /// A stop no bus serves yields an empty list, not `None`.
    pub fn stop_buses(&self, name: &str) -> Option<StopBuses> {
        self.catalogue.find_stop(name)?;
        let buses = self
            .catalogue
            .buses_at_stop(name)
            .into_iter()
            .map(str::to_string)
            .collect();
        Some(StopBuses { buses })
    }

    /// Fastest itinerary between two stops.
    ///
    /// `Ok(None)` means both stops exist but are not connected.
    pub fn route(&self, from: &str, to: &str) -> Result<Option<RouteResult>, RouteError> {
        let itinerary = self.router.build_route(from, to)?;
        Ok(itinerary.as_ref().map(RouteResult::from))
    }

    /// The network drawn as an SVG document.
    pub fn map(&self) -> MapImage {
        MapImage {
            map: self.renderer.render(&self.catalogue).to_string(),
        }
    }

    /// Answer one query.
    pub fn answer(&self, request: &StatRequest) -> StatResponse {
        trace!(id = request.id, query = ?request.query, "answering");

        let body = match &request.query {
            StatQuery::Bus { name } => self.bus_stats(name).map(ResponseBody::Bus),
            StatQuery::Stop { name } => self.stop_buses(name).map(ResponseBody::Stop),
            StatQuery::Route { from, to } => match self.route(from, to) {
                Ok(result) => result.map(ResponseBody::Route),
                Err(e) => {
                    debug!(id = request.id, error = %e, "route query failed");
                    None
                }
            },
            StatQuery::Map => Some(ResponseBody::Map(self.map())),
        };

        StatResponse {
            request_id: request.id,
            body: body.unwrap_or_else(|| ResponseBody::Error(ErrorMessage::not_found())),
        }
    }

    /// Answer every query, preserving order.
    pub fn answer_all(&self, requests: &[StatRequest]) -> Vec<StatResponse> {
        requests.iter().map(|request| self.answer(request)).collect()
    }
}

/// Populate a catalogue from base requests.
///
/// Stops are added first, then every declared road distance, then buses, so
/// the order of requests within the document does not matter and every bus
/// sees all distances.
///
/// # Errors
///
/// Returns the first [`CatalogueError`] encountered.
pub fn build_catalogue(requests: &[BaseRequest]) -> Result<TransportCatalogue, CatalogueError> {
    let mut catalogue = TransportCatalogue::new();

    for request in requests {
        if let BaseRequest::Stop(stop) = request {
            catalogue.add_stop(&stop.name, Coordinates::new(stop.latitude, stop.longitude))?;
        }
    }

    for request in requests {
        if let BaseRequest::Stop(stop) = request {
            for (neighbour, &distance) in &stop.road_distances {
                catalogue.add_distance(&stop.name, neighbour, distance);
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus(bus) = request {
            catalogue.add_bus(&bus.name, &bus.stops, bus.is_roundtrip)?;
        }
    }

    Ok(catalogue)
}

/// Parse a request document from any reader.
pub fn read_document<R: Read>(reader: R) -> Result<Document, RequestError> {
    let document: Document = serde_json::from_reader(reader)?;
    debug!(
        base_requests = document.base_requests.len(),
        stat_requests = document.stat_requests.len(),
        "parsed request document"
    );
    Ok(document)
}

/// Parse a request document from a file.
pub fn load_document(path: &Path) -> Result<Document, RequestError> {
    let file = File::open(path)?;
    read_document(BufReader::new(file))
}

/// Build the network a document describes and answer all its queries.
pub fn process_document(document: &Document) -> Result<Vec<StatResponse>, RequestError> {
    let handler = RequestHandler::from_document(document)?;
    Ok(handler.answer_all(&document.stat_requests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::io::Write;

    fn sample() -> Value {
        json!({
            "base_requests": [
                {
                    "type": "Bus",
                    "name": "297",
                    "stops": ["Biryulyovo Zapadnoye", "Biryulyovo Tovarnaya", "Universam", "Biryulyovo Zapadnoye"],
                    "is_roundtrip": true
                },
                {
                    "type": "Bus",
                    "name": "635",
                    "stops": ["Biryulyovo Tovarnaya", "Universam", "Prazhskaya"],
                    "is_roundtrip": false
                },
                {
                    "type": "Stop",
                    "name": "Biryulyovo Zapadnoye",
                    "latitude": 55.574371,
                    "longitude": 37.6517,
                    "road_distances": {"Biryulyovo Tovarnaya": 2600}
                },
                {
                    "type": "Stop",
                    "name": "Biryulyovo Tovarnaya",
                    "latitude": 55.592028,
                    "longitude": 37.653656,
                    "road_distances": {"Universam": 890}
                },
                {
                    "type": "Stop",
                    "name": "Universam",
                    "latitude": 55.587655,
                    "longitude": 37.645687,
                    "road_distances": {"Biryulyovo Zapadnoye": 2500, "Prazhskaya": 4650, "Biryulyovo Tovarnaya": 1380}
                },
                {
                    "type": "Stop",
                    "name": "Prazhskaya",
                    "latitude": 55.611717,
                    "longitude": 37.603938,
                    "road_distances": {}
                },
                {
                    "type": "Stop",
                    "name": "Lonely",
                    "latitude": 55.6,
                    "longitude": 37.6
                }
            ],
            "routing_settings": {"bus_wait_time": 2, "bus_velocity": 30},
            "stat_requests": [
                {"id": 1, "type": "Bus", "name": "297"},
                {"id": 2, "type": "Bus", "name": "635"},
                {"id": 3, "type": "Stop", "name": "Universam"},
                {"id": 4, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Universam"},
                {"id": 5, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Prazhskaya"},
                {"id": 6, "type": "Bus", "name": "999"},
                {"id": 7, "type": "Stop", "name": "Nowhere"},
                {"id": 8, "type": "Stop", "name": "Lonely"},
                {"id": 9, "type": "Route", "from": "Universam", "to": "Lonely"},
                {"id": 10, "type": "Route", "from": "Universam", "to": "Nowhere"},
                {"id": 11, "type": "Route", "from": "Universam", "to": "Universam"}
            ]
        })
    }

    fn responses() -> Vec<Value> {
        let document: Document = serde_json::from_value(sample()).unwrap();
        let responses = process_document(&document).unwrap();
        responses
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect()
    }

    #[test]
    fn buses_may_precede_their_stops() {
        let document: Document = serde_json::from_value(sample()).unwrap();
        let handler = RequestHandler::from_document(&document).unwrap();

        assert_eq!(handler.catalogue().stop_count(), 5);
        assert_eq!(handler.catalogue().bus_count(), 2);
    }

    #[test]
    fn responses_keep_request_order() {
        let ids: Vec<_> = responses()
            .iter()
            .map(|r| r["request_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn roundtrip_bus_stats() {
        let response = &responses()[0];

        assert_eq!(response["stop_count"], 4);
        assert_eq!(response["unique_stop_count"], 3);
        // 2600 + 890 + 2500
        assert_eq!(response["route_length"], 5990);
        assert!(response["curvature"].as_f64().unwrap() > 1.0);
    }

    #[test]
    fn linear_bus_stats_use_reverse_distances() {
        let response = &responses()[1];

        assert_eq!(response["stop_count"], 5);
        assert_eq!(response["unique_stop_count"], 3);
        // Out: 890 + 4650, back: 4650 + 1380
        assert_eq!(response["route_length"], 11570);
    }

    #[test]
    fn stop_lists_buses_sorted() {
        assert_eq!(responses()[2]["buses"], json!(["297", "635"]));
    }

    #[test]
    fn route_items() {
        let response = &responses()[3];

        // Wait 2, then 2600 + 890 m at 30 km/h = 6.98 min
        let total = response["total_time"].as_f64().unwrap();
        assert!((total - 8.98).abs() < 1e-9);

        let items = response["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], json!({"type": "Wait", "stop_name": "Biryulyovo Zapadnoye", "time": 2.0}));
        assert_eq!(items[1]["type"], "Bus");
        assert_eq!(items[1]["bus"], "297");
        assert_eq!(items[1]["span_count"], 2);
    }

    #[test]
    fn route_with_change() {
        let response = &responses()[4];
        let items = response["items"].as_array().unwrap();

        let kinds: Vec<_> = items.iter().map(|i| i["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, ["Wait", "Bus", "Wait", "Bus"]);
        assert_eq!(items[3]["bus"], "635");
    }

    #[test]
    fn unknown_names_are_not_found() {
        let responses = responses();
        for index in [5, 6, 9] {
            assert_eq!(responses[index]["error_message"], "not found", "response {index}");
        }
    }

    #[test]
    fn unserved_stop_has_empty_bus_list() {
        assert_eq!(responses()[7], json!({"request_id": 8, "buses": []}));
    }

    #[test]
    fn unreachable_stop_is_not_found() {
        assert_eq!(
            responses()[8],
            json!({"request_id": 9, "error_message": "not found"})
        );
    }

    #[test]
    fn route_to_same_stop_is_empty() {
        assert_eq!(
            responses()[10],
            json!({"request_id": 11, "total_time": 0.0, "items": []})
        );
    }

    #[test]
    fn map_answered_alongside_other_queries() {
        let mut value = sample();
        value["stat_requests"] = json!([
            {"id": 1, "type": "Stop", "name": "Universam"},
            {"id": 2, "type": "Map"}
        ]);
        let document: Document = serde_json::from_value(value).unwrap();

        let responses = process_document(&document).unwrap();
        assert_eq!(responses.len(), 2);
        assert!(matches!(responses[0].body, ResponseBody::Stop(_)));

        let ResponseBody::Map(image) = &responses[1].body else {
            panic!("expected map, got {:?}", responses[1].body);
        };
        assert!(image.map.starts_with("<?xml"));
        assert!(image.map.ends_with("</svg>"));
        assert!(image.map.contains(">297</text>"));
        assert!(image.map.contains(">Universam</text>"));
        assert!(!image.map.contains("Lonely"));
    }

    #[test]
    fn duplicate_stop_fails_document() {
        let document: Document = serde_json::from_value(json!({
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
                {"type": "Stop", "name": "A", "latitude": 1.0, "longitude": 1.0}
            ]
        }))
        .unwrap();

        let result = process_document(&document);
        assert!(matches!(
            result,
            Err(RequestError::Catalogue(CatalogueError::DuplicateStop(_)))
        ));
    }

    #[test]
    fn bus_through_unknown_stop_fails_document() {
        let document: Document = serde_json::from_value(json!({
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
                {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": false}
            ]
        }))
        .unwrap();

        assert!(matches!(
            process_document(&document),
            Err(RequestError::Catalogue(CatalogueError::UnknownStop { .. }))
        ));
    }

    #[test]
    fn invalid_settings_fail_document() {
        let document: Document = serde_json::from_value(json!({
            "routing_settings": {"bus_wait_time": 6, "bus_velocity": 0}
        }))
        .unwrap();

        assert!(matches!(
            process_document(&document),
            Err(RequestError::Settings(_))
        ));
    }

    #[test]
    fn distances_to_unknown_stops_are_ignored() {
        let requests: Vec<BaseRequest> = serde_json::from_value(json!([
            {
                "type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
                "road_distances": {"Ghost": 100, "B": -5}
            },
            {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.01}
        ]))
        .unwrap();

        let catalogue = build_catalogue(&requests).unwrap();
        assert_eq!(catalogue.stop_count(), 2);
        // Negative declaration skipped, so the geodesic fallback applies
        let (a, b) = (catalogue.stop_id("A").unwrap(), catalogue.stop_id("B").unwrap());
        assert_eq!(catalogue.distance("A", "B"), Some(catalogue.geo_distance(a, b)));
    }

    #[test]
    fn empty_document_answers_nothing() {
        let document = read_document("{}".as_bytes()).unwrap();
        assert!(process_document(&document).unwrap().is_empty());
    }

    #[test]
    fn read_malformed_document() {
        let result = read_document("[1, 2".as_bytes());
        assert!(matches!(result, Err(RequestError::Json(_))));
    }

    #[test]
    fn load_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample()).unwrap();

        let document = load_document(file.path()).unwrap();
        assert_eq!(document.base_requests.len(), 7);
        assert_eq!(document.stat_requests.len(), 11);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_document(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(RequestError::Io(_))));
    }
}
