//! Minimal SVG document model: circles, polylines and text.

use std::fmt::{self, Write};

use serde::Deserialize;

/// A point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Paint for fills and strokes.
///
/// Deserializes from a colour name (`"red"`), an `[r, g, b]` triple, or an
/// `[r, g, b, opacity]` quadruple.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "ColorRepr")]
pub enum Color {
    #[default]
    None,
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Named(name) => Color::Named(name),
            ColorRepr::Rgb(r, g, b) => Color::Rgb(r, g, b),
            ColorRepr::Rgba(r, g, b, a) => Color::Rgba(r, g, b, a),
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => f.write_str("none"),
            Color::Named(name) => f.write_str(name),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

impl fmt::Display for StrokeLineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineCap::Butt => "butt",
            StrokeLineCap::Round => "round",
            StrokeLineCap::Square => "square",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl fmt::Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineJoin::Arcs => "arcs",
            StrokeLineJoin::Bevel => "bevel",
            StrokeLineJoin::Miter => "miter",
            StrokeLineJoin::MiterClip => "miter-clip",
            StrokeLineJoin::Round => "round",
        })
    }
}

/// Presentation attributes shared by every shape. Unset attributes are not
/// written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathProps {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub line_cap: Option<StrokeLineCap>,
    pub line_join: Option<StrokeLineJoin>,
}

impl fmt::Display for PathProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, r#" fill="{fill}""#)?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, r#" stroke="{stroke}""#)?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, r#" stroke-width="{width}""#)?;
        }
        if let Some(cap) = self.line_cap {
            write!(f, r#" stroke-linecap="{cap}""#)?;
        }
        if let Some(join) = self.line_join {
            write!(f, r#" stroke-linejoin="{join}""#)?;
        }
        Ok(())
    }
}

/// Builder methods for anything carrying [`PathProps`].
pub trait Styled: Sized {
    fn props_mut(&mut self) -> &mut PathProps;

    fn fill(mut self, color: impl Into<Color>) -> Self {
        self.props_mut().fill = Some(color.into());
        self
    }

    fn stroke(mut self, color: impl Into<Color>) -> Self {
        self.props_mut().stroke = Some(color.into());
        self
    }

    fn stroke_width(mut self, width: f64) -> Self {
        self.props_mut().stroke_width = Some(width);
        self
    }

    fn line_cap(mut self, cap: StrokeLineCap) -> Self {
        self.props_mut().line_cap = Some(cap);
        self
    }

    fn line_join(mut self, join: StrokeLineJoin) -> Self {
        self.props_mut().line_join = Some(join);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub props: PathProps,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            props: PathProps::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub props: PathProps,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            props: PathProps::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub position: Point,
    pub offset: Point,
    pub font_size: u32,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub data: String,
    pub props: PathProps,
}

impl Text {
    pub fn new(position: Point, data: impl Into<String>) -> Self {
        Self {
            position,
            font_size: 1,
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }
}

impl Styled for Circle {
    fn props_mut(&mut self) -> &mut PathProps {
        &mut self.props
    }
}

impl Styled for Polyline {
    fn props_mut(&mut self) -> &mut PathProps {
        &mut self.props
    }
}

impl Styled for Text {
    fn props_mut(&mut self) -> &mut PathProps {
        &mut self.props
    }
}

/// Any drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}

impl From<Text> for Shape {
    fn from(text: Text) -> Self {
        Shape::Text(text)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle(c) => write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
                c.center.x, c.center.y, c.radius, c.props
            ),
            Shape::Polyline(p) => {
                f.write_str(r#"<polyline points=""#)?;
                for (i, point) in p.points.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{},{}", point.x, point.y)?;
                }
                write!(f, r#""{} />"#, p.props)
            }
            Shape::Text(t) => {
                write!(
                    f,
                    r#"<text x="{}" y="{}" dx="{}" dy="{}" font-size="{}""#,
                    t.position.x, t.position.y, t.offset.x, t.offset.y, t.font_size
                )?;
                if let Some(family) = &t.font_family {
                    write!(f, r#" font-family="{family}""#)?;
                }
                if let Some(weight) = &t.font_weight {
                    write!(f, r#" font-weight="{weight}""#)?;
                }
                write!(f, "{}>", t.props)?;
                write_escaped(f, &t.data)?;
                f.write_str("</text>")
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, data: &str) -> fmt::Result {
    for c in data.chars() {
        match c {
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&apos;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '&' => f.write_str("&amp;")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// An SVG image: shapes drawn in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n")?;
        f.write_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n")?;
        for shape in &self.shapes {
            writeln!(f, "  {shape}")?;
        }
        f.write_str("</svg>")
    }
}
