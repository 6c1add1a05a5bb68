//! Map rendering configuration.

use serde::Deserialize;

use super::svg::Color;

/// Layout and styling of the rendered map.
///
/// Every field is optional in the request document; missing ones take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: f64,

    /// Image height in pixels
    pub height: f64,

    /// Margin between the outermost stops and the image edge
    pub padding: f64,

    /// Stroke width of bus lines
    pub line_width: f64,

    /// Radius of stop markers
    pub stop_radius: f64,

    pub bus_label_font_size: u32,
    pub bus_label_offset: [f64; 2],

    pub stop_label_font_size: u32,
    pub stop_label_offset: [f64; 2],

    /// Halo drawn under every label
    pub underlayer_color: Color,
    pub underlayer_width: f64,

    /// Bus colours, assigned in bus name order and reused cyclically
    pub color_palette: Vec<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: [7.0, 15.0],
            stop_label_font_size: 20,
            stop_label_offset: [7.0, -3.0],
            underlayer_color: Color::from("white"),
            underlayer_width: 3.0,
            color_palette: ["red", "orange", "yellow", "green", "blue", "purple"]
                .into_iter()
                .map(Color::from)
                .collect(),
        }
    }
}

impl RenderSettings {
    /// Colour of the `index`-th bus in name order; `none` with an empty palette.
    pub fn bus_color(&self, index: usize) -> Color {
        if self.color_palette.is_empty() {
            return Color::None;
        }
        self.color_palette[index % self.color_palette.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let settings: RenderSettings = serde_json::from_str(
            r#"{
                "width": 600,
                "height": 400,
                "padding": 30,
                "line_width": 10,
                "stop_radius": 4,
                "bus_label_font_size": 18,
                "bus_label_offset": [6, 12],
                "stop_label_font_size": 14,
                "stop_label_offset": [5, -2],
                "underlayer_color": [255, 255, 255, 0.85],
                "underlayer_width": 2,
                "color_palette": ["green", [255, 160, 0], "red"]
            }"#,
        )
        .unwrap();

        assert_eq!(settings.width, 600.0);
        assert_eq!(settings.bus_label_offset, [6.0, 12.0]);
        assert_eq!(settings.underlayer_color, Color::Rgba(255, 255, 255, 0.85));
        assert_eq!(settings.color_palette.len(), 3);
        assert_eq!(settings.color_palette[1], Color::Rgb(255, 160, 0));
    }

    #[test]
    fn missing_fields_default() {
        let settings: RenderSettings = serde_json::from_str(r#"{"width": 800}"#).unwrap();

        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.height, 1200.0);
        assert_eq!(settings.color_palette, RenderSettings::default().color_palette);
    }

    #[test]
    fn palette_cycles() {
        let settings = RenderSettings {
            color_palette: vec![Color::from("red"), Color::from("blue")],
            ..RenderSettings::default()
        };

        assert_eq!(settings.bus_color(0), Color::from("red"));
        assert_eq!(settings.bus_color(1), Color::from("blue"));
        assert_eq!(settings.bus_color(2), Color::from("red"));
    }

    #[test]
    fn empty_palette_paints_nothing() {
        let settings = RenderSettings {
            color_palette: Vec::new(),
            ..RenderSettings::default()
        };
        assert_eq!(settings.bus_color(3), Color::None);
    }
}
