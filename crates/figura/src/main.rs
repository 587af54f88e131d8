//! figura: classify contours in an image by shape and dominant color.
//!
//! Loads an image, extracts contours, buckets them into circles /
//! rectangles / others, samples each object's centroid color against
//! the stock HSV table, and prints a per-object report. Optionally
//! writes the annotated SVG overlay and emits the object list as JSON.
//!
//! # Usage
//!
//! ```text
//! figura photo.png --svg annotated.svg
//! figura coins.jpg --edge threshold --threshold 60 --json
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use figura_annotate::SvgMetadata;
use figura_core::{
    ColorTable, HsvImage, LabelConfig, PartitionConfig, ShapeConfig, label_objects, partition,
};
use figura_raster::{EdgeDetectorKind, ExtractConfig};

/// Circularity threshold applied by this flow.
///
/// Deliberately stricter than the library default of 0.8; both values
/// are empirical.
const DEFAULT_CIRCULARITY: f64 = 0.82;

/// Classify contours in an image by shape and dominant color.
///
/// Extracts contours with configurable edge detection and area
/// filtering, then reports each surviving object as
/// `<shape> (<color>), area: <px^2>`.
#[derive(Parser)]
#[command(name = "figura", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Circularity threshold for the circle test.
    #[arg(long, default_value_t = DEFAULT_CIRCULARITY)]
    circularity: f64,

    /// Box-fill ratio a rectangular contour must exceed to stay in the
    /// rectangles bucket.
    #[arg(long, default_value_t = PartitionConfig::DEFAULT_BOX_FILL_RATIO)]
    box_fill: f64,

    /// Edge detection strategy.
    #[arg(long, value_enum, default_value_t = Edge::Canny)]
    edge: Edge,

    /// Canny low threshold.
    #[arg(long, default_value_t = EdgeDetectorKind::DEFAULT_CANNY_LOW)]
    canny_low: f32,

    /// Canny high threshold.
    #[arg(long, default_value_t = EdgeDetectorKind::DEFAULT_CANNY_HIGH)]
    canny_high: f32,

    /// Binarization threshold (used with `--edge threshold`).
    #[arg(long, default_value_t = EdgeDetectorKind::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Gaussian blur sigma applied before edge detection.
    #[arg(long, default_value_t = ExtractConfig::DEFAULT_BLUR_SIGMA)]
    blur_sigma: f32,

    /// Minimum extracted contour area in square pixels.
    #[arg(long, default_value_t = ExtractConfig::DEFAULT_MIN_AREA)]
    min_area: f64,

    /// Maximum extracted contour area in square pixels.
    #[arg(long, default_value_t = ExtractConfig::DEFAULT_MAX_AREA)]
    max_area: f64,

    /// Minimum labeled object area in square pixels.
    #[arg(long, default_value_t = LabelConfig::DEFAULT_MIN_AREA)]
    min_object_area: f64,

    /// Write the annotated SVG overlay to this path.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Emit the object list as JSON instead of the report lines.
    #[arg(long)]
    json: bool,

    /// Full extraction config as a JSON string.
    ///
    /// When provided, the individual extraction flags are ignored. The
    /// JSON must be a valid `ExtractConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Edge detection strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Edge {
    /// Canny edge detection on the blurred grayscale image.
    Canny,
    /// Binary thresholding of the blurred grayscale image.
    Threshold,
}

impl Cli {
    /// Resolve the extraction config from `--config-json` or the
    /// individual flags.
    fn extract_config(&self) -> Result<ExtractConfig, serde_json::Error> {
        if let Some(json) = &self.config_json {
            return serde_json::from_str(json);
        }
        let detector = match self.edge {
            Edge::Canny => EdgeDetectorKind::Canny {
                low: self.canny_low,
                high: self.canny_high,
            },
            Edge::Threshold => EdgeDetectorKind::Threshold {
                value: self.threshold,
            },
        };
        Ok(ExtractConfig {
            blur_sigma: self.blur_sigma,
            detector,
            min_area: self.min_area,
            max_area: self.max_area,
        })
    }

    fn partition_config(&self) -> PartitionConfig {
        PartitionConfig {
            shape: ShapeConfig {
                circularity_threshold: self.circularity,
                ..ShapeConfig::default()
            },
            box_fill_ratio: self.box_fill,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&cli.image_path)?;
    let extract_config = cli.extract_config()?;
    let extraction = figura_raster::process(&bytes, &extract_config)?;
    println!("Contours found: {}", extraction.contours.len());

    let buckets = partition(&extraction.contours, &cli.partition_config())?;
    println!(
        "Circles: {}, Rectangles: {}, Others: {}",
        buckets.circles.len(),
        buckets.rectangles.len(),
        buckets.others.len(),
    );

    let (contours, shapes) = buckets.flatten();
    let hsv = HsvImage::from_rgb(&extraction.image);
    let objects = label_objects(
        &hsv,
        &contours,
        &shapes,
        &ColorTable::default(),
        &LabelConfig {
            min_area: cli.min_object_area,
        },
    )?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&objects)?);
    } else {
        println!("\nDetected objects:");
        for (i, object) in objects.iter().enumerate() {
            println!(
                "{}: {} ({}), area: {:.1}",
                i + 1,
                object.shape,
                object.color,
                object.area,
            );
        }
    }

    if let Some(svg_path) = &cli.svg {
        let title = cli
            .image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        let description = format!(
            "figura overlay: {} objects, circularity threshold {}",
            objects.len(),
            cli.circularity,
        );
        let metadata = SvgMetadata {
            title: title.as_deref(),
            description: Some(&description),
        };
        let svg = figura_annotate::to_svg(&objects, extraction.dimensions, &metadata);
        std::fs::write(svg_path, svg)?;
        println!("Annotated overlay saved: {}", svg_path.display());
    }

    Ok(())
}
