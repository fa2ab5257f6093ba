//! # Interactive Polygon Editor Library
//!
//! Edit polygons derived from detected edges in a captured frame: detect
//! edges, polygonize contours, select a polygon, drag its vertices, and
//! compare its area against its minimum bounding rectangle and convex hull.
//!
//! The computer-vision primitives (Canny edges, contour tracing,
//! Douglas-Peucker approximation, minimum rotated rectangle, convex hull)
//! come from `imageproc` and `geo`; capture and display stay behind the
//! [`FrameSource`] and [`Surface`] traits.
//!
//! ## Core Features
//!
//! - **Trait-based Pipeline**: swap edge detection, contour extraction and
//!   approximation independently
//! - **Explicit Session**: every transition is a method of one session
//!   value, driven by a unified keyboard/pointer event stream
//! - **Measurements**: polygon, rectangle and convex hull areas per fit
//! - **GeoJSON Export**: polygon sets serialize to standard GeoJSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polyedit::{EditorCommand, Session};
//!
//! let frame = image::open("frame.png")?.to_rgb8();
//! let mut session = Session::new(frame);
//!
//! session.apply(EditorCommand::DetectEdges)?;
//! session.apply(EditorCommand::ExtractPolygons)?;
//! session.apply(EditorCommand::SelectNext)?;
//! if let Some(fit) = session.apply(EditorCommand::FitRectangle)? {
//!     println!("polygon {} rectangle {}", fit.polygon_area, fit.rectangle_area);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use polyedit::{Pipeline, Session};
//! use std::sync::Arc;
//!
//! let pipeline = Pipeline::builder()
//!     .with_canny_thresholds(30.0, 90.0)
//!     .with_fixed_tolerance(2.0)
//!     .build();
//!
//! let frame = image::open("frame.png")?.to_rgb8();
//! let session = Session::with_pipeline(frame, Arc::new(pipeline));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod session;
pub mod render;
pub mod runner;
pub mod io;

// Re-exports for convenience
pub use error::{EditorError, Result};
pub use types::{Polygon, RectangleFit};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use session::{Direction, EditorCommand, InputEvent, Key, Session};
pub use runner::{Runner, run_session};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn create_test_image() -> GrayImage {
        let mut img = GrayImage::new(100, 100);
        for y in 20..80 {
            for x in 20..80 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img
    }

    #[test]
    fn test_default_pipeline_polygonizes_a_square() {
        let pipeline = PipelineBuilder::build_default();
        let image = create_test_image();

        let polygons = pipeline.process(&image).expect("Should process successfully");
        assert!(!polygons.is_empty(), "Should find at least one polygon");
    }

    #[test]
    fn test_threshold_pipeline_yields_clean_square() {
        let pipeline = Pipeline::builder()
            .with_threshold(128)
            .build();
        let image = create_test_image();

        let polygons = pipeline.process(&image).expect("Should process successfully");
        assert_eq!(polygons.len(), 1, "A solid square has one external contour");

        let polygon = &polygons[0];
        assert!(polygon.points.len() >= 3);
        assert!(polygon.area() > 0.0);
    }

    #[test]
    fn test_polygonize_without_edges_reads_foreground() {
        let pipeline = PipelineBuilder::build_default();
        let image = create_test_image();

        let polygons = pipeline.polygonize(&image).expect("Should polygonize");
        assert_eq!(polygons.len(), 1);
    }

    #[test]
    fn test_empty_image_yields_no_polygons() {
        let pipeline = PipelineBuilder::build_default();
        let image = GrayImage::new(50, 50);

        let polygons = pipeline.process(&image).expect("Should process successfully");
        assert!(polygons.is_empty());
    }
}
