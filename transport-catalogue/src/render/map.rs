//! Draws the bus network as an SVG map.
//!
//! Layers, bottom to top: one polyline per bus, bus name labels at the
//! terminals, a marker per served stop, and stop name labels. Buses and stops
//! are drawn in name order; stops no bus serves are left out entirely.

use tracing::debug;

use crate::catalogue::TransportCatalogue;
use crate::domain::{Bus, Stop};
use crate::geo::Coordinates;
use crate::ids::StopId;

use super::settings::RenderSettings;
use super::svg::{
    Circle, Color, Document, Point, Polyline, StrokeLineCap, StrokeLineJoin, Styled, Text,
};

/// Spans below this are treated as zero when fitting the map.
const EPSILON: f64 = 1e-6;

const LABEL_FONT: &str = "Verdana";

/// Linear projection of coordinates onto the image, fitted so that every
/// point lands inside the padded area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new(
        points: impl IntoIterator<Item = Coordinates>,
        width: f64,
        height: f64,
        padding: f64,
    ) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self {
                padding,
                min_lng: 0.0,
                max_lat: 0.0,
                zoom: 0.0,
            };
        };

        let (mut min_lng, mut max_lng) = (first.lng, first.lng);
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        for point in points {
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
        }

        let width_zoom =
            (max_lng - min_lng >= EPSILON).then(|| (width - 2.0 * padding) / (max_lng - min_lng));
        let height_zoom =
            (max_lat - min_lat >= EPSILON).then(|| (height - 2.0 * padding) / (max_lat - min_lat));

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(z), None) | (None, Some(z)) => z,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lng,
            max_lat,
            zoom,
        }
    }

    pub fn project(&self, coordinates: Coordinates) -> Point {
        Point::new(
            (coordinates.lng - self.min_lng) * self.zoom + self.padding,
            (self.max_lat - coordinates.lat) * self.zoom + self.padding,
        )
    }
}

/// Renders a catalogue with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Draw every bus and served stop of the catalogue.
    pub fn render(&self, catalogue: &TransportCatalogue) -> Document {
        let mut buses: Vec<&Bus> = catalogue
            .buses()
            .iter()
            .filter(|bus| !bus.stops().is_empty())
            .collect();
        buses.sort_by(|a, b| a.name().cmp(b.name()));

        let mut stops: Vec<&Stop> = catalogue
            .stops()
            .iter()
            .filter(|stop| !catalogue.buses_at_stop(stop.name()).is_empty())
            .collect();
        stops.sort_by(|a, b| a.name().cmp(b.name()));

        let projector = SphereProjector::new(
            stops.iter().map(|stop| stop.coordinates()),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );
        let position = |id: StopId| projector.project(catalogue.stop(id).coordinates());

        let mut document = Document::new();

        for (index, bus) in buses.iter().enumerate() {
            let points = bus.stops().iter().map(|&id| position(id)).collect();
            document.add(
                Polyline::new(points)
                    .fill(Color::None)
                    .stroke(self.settings.bus_color(index))
                    .stroke_width(self.settings.line_width)
                    .line_cap(StrokeLineCap::Round)
                    .line_join(StrokeLineJoin::Round),
            );
        }

        for (index, bus) in buses.iter().enumerate() {
            for terminal in terminals(bus) {
                let label = Text::new(position(terminal), bus.name())
                    .offset(offset(self.settings.bus_label_offset))
                    .font_size(self.settings.bus_label_font_size)
                    .font_family(LABEL_FONT)
                    .font_weight("bold");
                document.add(self.underlayer(label.clone()));
                document.add(label.fill(self.settings.bus_color(index)));
            }
        }

        for stop in &stops {
            document.add(
                Circle::new(projector.project(stop.coordinates()), self.settings.stop_radius)
                    .fill("white"),
            );
        }

        for stop in &stops {
            let label = Text::new(projector.project(stop.coordinates()), stop.name())
                .offset(offset(self.settings.stop_label_offset))
                .font_size(self.settings.stop_label_font_size)
                .font_family(LABEL_FONT);
            document.add(self.underlayer(label.clone()));
            document.add(label.fill("black"));
        }

        debug!(
            buses = buses.len(),
            stops = stops.len(),
            shapes = document.shapes().len(),
            "rendered map"
        );
        document
    }

    fn underlayer(&self, label: Text) -> Text {
        label
            .fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .line_cap(StrokeLineCap::Round)
            .line_join(StrokeLineJoin::Round)
    }
}

/// Stops where a bus's name is shown: the first stop, plus the far end of a
/// linear route when it differs.
fn terminals(bus: &Bus) -> Vec<StopId> {
    let stops = bus.stops();
    let Some(&first) = stops.first() else {
        return Vec::new();
    };
    if bus.is_roundtrip() {
        return vec![first];
    }

    let last = stops[stops.len() / 2];
    if last == first {
        vec![first]
    } else {
        vec![first, last]
    }
}

fn offset([dx, dy]: [f64; 2]) -> Point {
    Point::new(dx, dy)
}
