//! Point-sample color classification against an ordered HSV range table.
//!
//! Colors are expressed in the OpenCV 8-bit HSV convention (hue in
//! half-degrees, 0..=180, so the hue circle wraps at 180; saturation
//! and value in 0..=255) because color range tables in the
//! imaging ecosystem are written in those units. Red straddles the hue
//! wrap point and therefore needs two intervals; the table represents
//! every entry as a non-empty list of intervals so a single range is
//! just a one-element list and matching is one code path.

use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, RgbImage};

/// Name returned when no table entry matches or the sample point lies
/// outside the image.
pub const UNKNOWN_COLOR: &str = "unknown";

/// A pixel in the OpenCV 8-bit HSV convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in half-degrees, 0..=180.
    pub h: u8,
    /// Saturation, 0..=255.
    pub s: u8,
    /// Value (brightness), 0..=255.
    pub v: u8,
}

impl Hsv {
    /// Create an HSV triple.
    #[must_use]
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert an 8-bit RGB pixel.
    ///
    /// Hue is truncated to half-degrees like OpenCV's 8-bit path, so
    /// the result lies in 0..=179; a range with an upper hue bound of
    /// 180 is therefore inclusive of everything up to the wrap point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r_n = f64::from(r) / 255.0;
        let g_n = f64::from(g) / 255.0;
        let b_n = f64::from(b) / 255.0;

        let max = r_n.max(g_n).max(b_n);
        let min = r_n.min(g_n).min(b_n);
        let delta = max - min;

        let h_deg = if delta < 1e-9 {
            0.0
        } else if (max - r_n).abs() < 1e-9 {
            60.0 * (((g_n - b_n) / delta) % 6.0)
        } else if (max - g_n).abs() < 1e-9 {
            60.0 * (((b_n - r_n) / delta) + 2.0)
        } else {
            60.0 * (((r_n - g_n) / delta) + 4.0)
        };
        let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

        let s = if max < 1e-9 {
            0.0
        } else {
            (delta / max) * 255.0
        };

        Self {
            h: (h_deg / 2.0) as u8,
            s: s.round() as u8,
            v: (max * 255.0).round() as u8,
        }
    }
}

/// A closed HSV interval: a pixel matches when every channel lies
/// within the corresponding bound, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Lower bound, inclusive per channel.
    pub lower: Hsv,
    /// Upper bound, inclusive per channel.
    pub upper: Hsv,
}

impl HsvRange {
    /// Create a range from inclusive bounds.
    #[must_use]
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Channel-wise inclusive membership test.
    #[must_use]
    pub const fn contains(&self, pixel: Hsv) -> bool {
        pixel.h >= self.lower.h
            && pixel.h <= self.upper.h
            && pixel.s >= self.lower.s
            && pixel.s <= self.upper.s
            && pixel.v >= self.lower.v
            && pixel.v <= self.upper.v
    }
}

/// One named color: a non-empty ordered list of HSV intervals. A pixel
/// belongs to the color when it falls inside ANY of the intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    /// Color name reported for matching pixels.
    pub name: String,
    /// Intervals tested in order; hue-wrapping colors list two.
    pub ranges: Vec<HsvRange>,
}

/// Ordered table of named HSV ranges.
///
/// Iteration order is insertion order and is significant: when a pixel
/// satisfies more than one entry, the FIRST matching entry wins.
/// Constructed once and read-only during classification, so a shared
/// reference is safe across concurrent lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTable(Vec<ColorEntry>);

impl ColorTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry, preserving insertion order.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, ranges: Vec<HsvRange>) -> Self {
        self.0.push(ColorEntry {
            name: name.into(),
            ranges,
        });
        self
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ColorEntry] {
        &self.0
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for ColorTable {
    /// The stock table: red (two intervals, one each side of the hue
    /// wrap), then green, blue, and yellow.
    fn default() -> Self {
        Self::new()
            .with(
                "red",
                vec![
                    HsvRange::new(Hsv::new(0, 50, 50), Hsv::new(10, 255, 255)),
                    HsvRange::new(Hsv::new(160, 50, 50), Hsv::new(180, 255, 255)),
                ],
            )
            .with(
                "green",
                vec![HsvRange::new(Hsv::new(35, 50, 50), Hsv::new(85, 255, 255))],
            )
            .with(
                "blue",
                vec![HsvRange::new(
                    Hsv::new(100, 50, 50),
                    Hsv::new(130, 255, 255),
                )],
            )
            .with(
                "yellow",
                vec![HsvRange::new(Hsv::new(20, 50, 50), Hsv::new(35, 255, 255))],
            )
    }
}

/// A pixel-addressable HSV grid, converted once from an RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<Hsv>,
}

impl HsvImage {
    /// Convert a whole RGB image.
    #[must_use]
    pub fn from_rgb(image: &RgbImage) -> Self {
        let pixels = image
            .pixels()
            .map(|p| Hsv::from_rgb(p.0[0], p.0[1], p.0[2]))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Build an image by evaluating `f` at every pixel coordinate.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Hsv) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image dimensions in pixels.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the image (including any
    /// negative coordinate).
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn get(&self, x: i64, y: i64) -> Option<Hsv> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels.get(index).copied()
    }
}

/// Classify the color at a single sample point.
///
/// Out-of-bounds coordinates yield [`UNKNOWN_COLOR`] without error.
/// Otherwise the pixel is tested against each table entry in insertion
/// order; the first entry with any containing interval wins and
/// iteration stops. No match yields [`UNKNOWN_COLOR`].
#[must_use]
pub fn classify_color<'t>(image: &HsvImage, x: i64, y: i64, table: &'t ColorTable) -> &'t str {
    let Some(pixel) = image.get(x, y) else {
        return UNKNOWN_COLOR;
    };
    for entry in table.entries() {
        if entry.ranges.iter().any(|range| range.contains(pixel)) {
            return &entry.name;
        }
    }
    UNKNOWN_COLOR
}
