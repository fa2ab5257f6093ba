use geo_types::{Coord, LineString, Polygon as GeoPolygon};
use imageproc::point::Point;
use serde::Serialize;

/// An editable polygon: an ordered ring of integer pixel vertices.
///
/// Vertex order is the contour order produced by extraction and is
/// semantically meaningful — rendering joins consecutive vertices and
/// vertex indices identify drag targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point<i32>>,
}

impl Polygon {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Convert to a geo-types polygon for geometric operations.
    ///
    /// The ring is closed implicitly by `geo`.
    pub fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|p| Coord {
                x: f64::from(p.x),
                y: f64::from(p.y),
            })
            .collect();

        GeoPolygon::new(LineString::new(coords), vec![])
    }

    /// Unsigned area of the closed ring.
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Length of the closed ring, including the edge back to the first vertex.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }

        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                let dx = f64::from(a.x - b.x);
                let dy = f64::from(a.y - b.y);
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    /// Index of the first vertex strictly within `radius` pixels of (x, y).
    ///
    /// First match wins; there is no closest-match tie-break.
    pub fn vertex_near(&self, x: i32, y: i32, radius: f64) -> Option<usize> {
        self.points.iter().position(|p| {
            let dx = f64::from(p.x - x);
            let dy = f64::from(p.y - y);
            (dx * dx + dy * dy).sqrt() < radius
        })
    }
}

/// Report produced by fitting a minimum-area bounding rectangle to a polygon.
///
/// `hull_area` is the area of the polygon's convex hull. The source this
/// tool reproduces printed that number under the label "intersection"; the
/// computation is preserved, the label is not.
#[derive(Debug, Clone, Serialize)]
pub struct RectangleFit {
    /// Rectangle corners, in ring order. Fitted in f64; round for drawing.
    pub corners: [(f64, f64); 4],
    pub polygon_area: f64,
    pub rectangle_area: f64,
    pub hull_area: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(5, 10),
        ])
    }

    #[test]
    fn test_triangle_area() {
        assert!((triangle().area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter_closes_the_ring() {
        let square = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        assert!((square.perimeter() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertex_near_first_match_wins() {
        let polygon = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(2, 2),
            Point::new(3, 3),
        ]);
        // Both vertex 1 and vertex 2 are within 5px of (3, 3); the scan
        // returns the earlier index.
        assert_eq!(polygon.vertex_near(3, 3, 5.0), Some(1));
        assert_eq!(polygon.vertex_near(100, 100, 5.0), None);
    }

    #[test]
    fn test_vertex_near_radius_is_strict() {
        let polygon = Polygon::new(vec![Point::new(0, 0)]);
        assert_eq!(polygon.vertex_near(5, 0, 5.0), None);
        assert_eq!(polygon.vertex_near(4, 0, 5.0), Some(0));
    }
}
