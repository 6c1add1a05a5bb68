//! SVG map of the bus network.

mod map;
mod settings;
pub mod svg;

pub use map::{MapRenderer, SphereProjector};
pub use settings::RenderSettings;
