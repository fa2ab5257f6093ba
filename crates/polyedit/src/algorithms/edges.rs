use image::GrayImage;

use crate::{error::Result, traits::EdgeDetector};

/// Canny edge detector.
#[derive(Debug, Clone)]
pub struct CannyEdgeDetector {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for CannyEdgeDetector {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::edges::canny(
            image,
            self.low_threshold,
            self.high_threshold,
        ))
    }
}

/// Threshold "edge" detector: binarizes the image instead of tracing
/// gradients. Useful when the input is already a mask.
#[derive(Debug, Clone)]
pub struct ThresholdEdgeDetector {
    pub threshold: u8,
}

impl Default for ThresholdEdgeDetector {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl EdgeDetector for ThresholdEdgeDetector {
    fn detect(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::contrast::threshold(image, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn square_image() -> GrayImage {
        let mut img = GrayImage::new(60, 60);
        for y in 15..45 {
            for x in 15..45 {
                img.put_pixel(x, y, Luma([200u8]));
            }
        }
        img
    }

    #[test]
    fn test_canny_finds_square_boundary() {
        let edges = CannyEdgeDetector::default()
            .detect(&square_image())
            .expect("Should detect edges");

        let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
        assert!(edge_pixels > 0, "Should mark boundary pixels");
        // The interior of the square is featureless.
        assert_eq!(edges.get_pixel(30, 30).0[0], 0);
    }

    #[test]
    fn test_threshold_binarizes() {
        let binary = ThresholdEdgeDetector::default()
            .detect(&square_image())
            .expect("Should threshold");

        assert_eq!(binary.get_pixel(30, 30).0[0], 255);
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
    }
}
