use crate::{
    algorithms::{
        CannyEdgeDetector, ExternalContourExtractor, FixedToleranceApproximator,
        PerimeterRatioApproximator, ThresholdEdgeDetector,
    },
    pipeline::Pipeline,
    traits::{ContourExtractor, EdgeDetector, PolygonApproximator},
};

/// Builder for editor pipelines with a fluent API.
pub struct PipelineBuilder {
    edge_detector: Option<Box<dyn EdgeDetector>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    approximator: Option<Box<dyn PolygonApproximator>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            edge_detector: None,
            contour_extractor: None,
            approximator: None,
        }
    }

    /// Set the edge detector (replaces any existing one).
    pub fn set_edge_detector<D>(mut self, detector: D) -> Self
    where
        D: EdgeDetector + 'static,
    {
        self.edge_detector = Some(Box::new(detector));
        self
    }

    /// Set the contour extractor (replaces any existing one).
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the polygon approximator (replaces any existing one).
    pub fn set_approximator<A>(mut self, approximator: A) -> Self
    where
        A: PolygonApproximator + 'static,
    {
        self.approximator = Some(Box::new(approximator));
        self
    }

    /// Use Canny edge detection with the given thresholds.
    pub fn with_canny_thresholds(self, low: f32, high: f32) -> Self {
        self.set_edge_detector(CannyEdgeDetector {
            low_threshold: low,
            high_threshold: high,
        })
    }

    /// Use thresholding instead of gradient edge detection.
    pub fn with_threshold(self, threshold: u8) -> Self {
        self.set_edge_detector(ThresholdEdgeDetector { threshold })
    }

    /// Approximate with a tolerance proportional to each contour's perimeter.
    pub fn with_perimeter_ratio(self, ratio: f64) -> Self {
        self.set_approximator(PerimeterRatioApproximator { ratio })
    }

    /// Approximate with an absolute pixel tolerance.
    pub fn with_fixed_tolerance(self, tolerance: f64) -> Self {
        self.set_approximator(FixedToleranceApproximator { tolerance })
    }

    /// Build the pipeline with default components where not specified.
    pub fn build(self) -> Pipeline {
        let edge_detector = self
            .edge_detector
            .unwrap_or_else(|| Box::new(CannyEdgeDetector::default()));

        let contour_extractor = self
            .contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor));

        let approximator = self
            .approximator
            .unwrap_or_else(|| Box::new(PerimeterRatioApproximator::default()));

        Pipeline::new(edge_detector, contour_extractor, approximator)
    }

    /// Build the default pipeline: Canny 50/150, external contours,
    /// perimeter-proportional approximation at 0.01.
    pub fn build_default() -> Pipeline {
        Self::new().build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
