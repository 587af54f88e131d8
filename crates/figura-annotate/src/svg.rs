//! SVG overlay serializer.
//!
//! Converts classified objects into an SVG string using the [`svg`]
//! crate for document construction, XML escaping, and path data
//! formatting.
//!
//! Each object becomes a closed `<path>` element (`M`/`L` commands plus
//! a closing command) stroked by its shape bucket (green for circles,
//! blue for rectangles, gray for everything else), with a
//! `"<shape> <color>"` text label and a 1-based numeric index placed at
//! the contour centroid. The `viewBox` matches the source image pixel
//! grid so the overlay aligns with the original raster.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Element, Path, Title};
use svg::node::{Node, Text, Value};

use figura_core::{ClassifiedObject, Contour, Dimensions, ShapeClass, geometry};

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag. Text
/// values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title — emitted as `<title>`.
    ///
    /// Typically the source image filename (without extension).
    pub title: Option<&'a str>,

    /// Document description — emitted as `<desc>`.
    ///
    /// Typically the extraction parameters, so annotated files are
    /// distinguishable.
    pub description: Option<&'a str>,
}

/// Outline stroke color for a shape bucket.
const fn outline_color(shape: ShapeClass) -> &'static str {
    match shape {
        ShapeClass::Circle => "green",
        ShapeClass::Rectangle => "blue",
        ShapeClass::Other => "gray",
    }
}

/// Build a closed SVG path `d` attribute string from a contour.
///
/// Uses `M` for the first point, `L` for subsequent points, and a
/// closing command for the implicit ring edge. Returns an empty string
/// for contours with fewer than 2 points.
#[must_use]
pub fn build_outline_data(contour: &Contour) -> String {
    let points = contour.points();
    if points.len() < 2 {
        return String::new();
    }

    let first = &points[0];
    let mut data = Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    data = data.close();
    String::from(Value::from(data))
}

/// Text element at `(x, y)` with the given content.
fn text_element(x: f64, y: f64, content: &str) -> Element {
    let mut element = Element::new("text");
    element.assign("x", x);
    element.assign("y", y);
    element.assign("fill", "black");
    element.assign("font-family", "sans-serif");
    element.assign("font-size", 12);
    element.append(Text::new(content));
    element
}

/// Serialize classified objects into an SVG overlay document string.
///
/// Objects whose contours cannot form a visible outline (fewer than 2
/// points) are skipped entirely; objects without a defined centroid
/// keep their outline but get no label.
#[must_use]
pub fn to_svg(
    objects: &[ClassifiedObject],
    dimensions: Dimensions,
    metadata: &SvgMetadata<'_>,
) -> String {
    let mut doc = Document::new()
        .set("width", dimensions.width)
        .set("height", dimensions.height)
        .set("viewBox", (0, 0, dimensions.width, dimensions.height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    for (index, object) in objects.iter().enumerate() {
        let d = build_outline_data(&object.contour);
        if d.is_empty() {
            continue;
        }

        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", outline_color(object.shape))
            .set("stroke-width", 2);
        doc = doc.add(path);

        let Some(center) = geometry::centroid(&object.contour) else {
            continue;
        };
        let label = format!("{} {}", object.shape, object.color);
        doc = doc.add(text_element(center.x - 40.0, center.y, &label));
        doc = doc.add(text_element(
            center.x - 10.0,
            center.y + 20.0,
            &(index + 1).to_string(),
        ));
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
