use image::GrayImage;
use imageproc::point::Point;

use crate::{error::Result, traits::ContourExtractor};

/// Extracts only the outermost contours, ignoring anything nested inside
/// another border.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor;

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Vec<Point<i32>>>> {
        let contours = imageproc::contours::find_contours::<i32>(image);

        let result = contours
            .into_iter()
            .filter(|c| c.parent.is_none())
            .map(|c| c.points)
            .collect();

        Ok(result)
    }
}

/// Extracts every traced border, outer and hole alike.
#[derive(Debug, Clone, Default)]
pub struct AllContourExtractor;

impl ContourExtractor for AllContourExtractor {
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Vec<Point<i32>>>> {
        let contours = imageproc::contours::find_contours::<i32>(image);

        Ok(contours.into_iter().map(|c| c.points).collect())
    }
}
