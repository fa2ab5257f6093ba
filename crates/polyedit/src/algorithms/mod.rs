pub mod approximation;
pub mod edges;
pub mod extraction;
pub mod measurement;

pub use approximation::{FixedToleranceApproximator, PerimeterRatioApproximator};
pub use edges::{CannyEdgeDetector, ThresholdEdgeDetector};
pub use extraction::{AllContourExtractor, ExternalContourExtractor};
pub use measurement::fit_rectangle;
