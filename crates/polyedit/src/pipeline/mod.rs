pub mod builder;

use image::GrayImage;
use tracing::debug;

use crate::{
    error::Result,
    traits::{ContourExtractor, EdgeDetector, PolygonApproximator},
    types::Polygon,
};

/// The computer-vision pipeline behind the editor: edge detection, contour
/// extraction and polygon approximation, each behind its trait seam.
pub struct Pipeline {
    edge_detector: Box<dyn EdgeDetector>,
    contour_extractor: Box<dyn ContourExtractor>,
    approximator: Box<dyn PolygonApproximator>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        edge_detector: Box<dyn EdgeDetector>,
        contour_extractor: Box<dyn ContourExtractor>,
        approximator: Box<dyn PolygonApproximator>,
    ) -> Self {
        Self {
            edge_detector,
            contour_extractor,
            approximator,
        }
    }

    /// Compute the edge map of a grayscale image.
    pub fn detect_edges(&self, image: &GrayImage) -> Result<GrayImage> {
        self.edge_detector.detect(image)
    }

    /// Extract contours from an image and approximate each as a polygon.
    pub fn polygonize(&self, image: &GrayImage) -> Result<Vec<Polygon>> {
        let contours = self.contour_extractor.extract_contours(image)?;
        debug!(contours = contours.len(), "extracted contours");

        let mut polygons = Vec::with_capacity(contours.len());
        for contour in &contours {
            polygons.push(self.approximator.approximate(contour)?);
        }
        polygons.retain(|p| !p.points.is_empty());

        Ok(polygons)
    }

    /// Run the full chain: edge detection, then polygonization of the
    /// edge map.
    pub fn process(&self, image: &GrayImage) -> Result<Vec<Polygon>> {
        let edges = self.detect_edges(image)?;
        self.polygonize(&edges)
    }
}
