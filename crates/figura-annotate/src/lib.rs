//! figura-annotate: pure overlay serializer for classification results.
//!
//! Converts a labeled object list into an SVG document that overlays
//! the source image coordinate space: one closed outline per object,
//! a `"<shape> <color>"` text label, and a 1-based numeric index at
//! each centroid. Returns a `String`; persisting it is the caller's
//! job.

pub mod svg;

pub use svg::{SvgMetadata, to_svg};
