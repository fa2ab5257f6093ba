use geo::Simplify;
use geo_types::{Coord, LineString};
use imageproc::point::Point;

use crate::{error::Result, traits::PolygonApproximator, types::Polygon};

/// Douglas-Peucker approximation with a tolerance proportional to the
/// contour's closed perimeter.
#[derive(Debug, Clone)]
pub struct PerimeterRatioApproximator {
    /// Tolerance as a fraction of the contour perimeter.
    pub ratio: f64,
}

impl Default for PerimeterRatioApproximator {
    fn default() -> Self {
        Self { ratio: 0.01 }
    }
}

impl PolygonApproximator for PerimeterRatioApproximator {
    fn approximate(&self, contour: &[Point<i32>]) -> Result<Polygon> {
        let tolerance = self.ratio * closed_length(contour);
        Ok(Polygon::new(simplify_ring(contour, tolerance)))
    }
}

/// Douglas-Peucker approximation with an absolute pixel tolerance.
#[derive(Debug, Clone)]
pub struct FixedToleranceApproximator {
    pub tolerance: f64,
}

impl Default for FixedToleranceApproximator {
    fn default() -> Self {
        Self { tolerance: 2.0 }
    }
}

impl PolygonApproximator for FixedToleranceApproximator {
    fn approximate(&self, contour: &[Point<i32>]) -> Result<Polygon> {
        Ok(Polygon::new(simplify_ring(contour, self.tolerance)))
    }
}

/// Length of the contour treated as a closed ring.
fn closed_length(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            let dx = f64::from(a.x - b.x);
            let dy = f64::from(a.y - b.y);
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Simplify a closed ring of integer points.
///
/// The ring is closed before simplification so the wrap-around edge is
/// honored, and reopened afterwards. Douglas-Peucker keeps a subset of the
/// input vertices, so rounding back to integers is lossless.
fn simplify_ring(points: &[Point<i32>], tolerance: f64) -> Vec<Point<i32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord {
            x: f64::from(p.x),
            y: f64::from(p.y),
        })
        .collect();
    coords.push(coords[0]);

    let simplified = LineString::new(coords).simplify(&tolerance);

    let mut result: Vec<Point<i32>> = simplified
        .coords()
        .map(|c| Point::new(c.x.round() as i32, c.y.round() as i32))
        .collect();

    if result.len() > 1 && result.first() == result.last() {
        result.pop();
    }

    result
}
