use image::{GrayImage, RgbImage};
use imageproc::point::Point;

use crate::{
    error::Result,
    session::{InputEvent, Session},
    types::Polygon,
};

/// Trait for edge detection algorithms.
pub trait EdgeDetector: Send + Sync {
    /// Produce an edge map (edges non-zero, background zero) from a
    /// grayscale image.
    fn detect(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms.
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from an image; non-zero pixels are foreground.
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Vec<Point<i32>>>>;
}

/// Trait for polygon approximation algorithms.
pub trait PolygonApproximator: Send + Sync {
    /// Reduce a contour to a polygon within the algorithm's tolerance.
    fn approximate(&self, contour: &[Point<i32>]) -> Result<Polygon>;
}

/// A capture device yielding frames on demand.
pub trait FrameSource {
    /// The next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// A display/input surface: shows the working image and yields input events.
pub trait Surface {
    /// Display the current working image.
    fn present(&mut self, frame: &RgbImage) -> Result<()>;

    /// The next pending input event, if any.
    ///
    /// Implementations backed by a real window should block briefly here;
    /// the session loop calls this once per tick.
    fn poll_event(&mut self) -> Result<Option<InputEvent>>;

    /// Called when a session's loop has terminated, before the next frame
    /// is captured.
    fn session_ended(&mut self, _session: &Session) -> Result<()> {
        Ok(())
    }
}
