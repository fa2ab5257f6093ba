use geo::{Area, ConvexHull, MinimumRotatedRect};

use crate::types::{Polygon, RectangleFit};

/// Fit the minimum-area (rotated) bounding rectangle of a polygon and
/// measure it against the polygon and its convex hull.
///
/// The fit runs in f64 so the reported areas satisfy
/// rectangle >= hull >= polygon; corners are only rounded by the renderer.
/// Returns `None` for degenerate polygons the fit is undefined for.
pub fn fit_rectangle(polygon: &Polygon) -> Option<RectangleFit> {
    if polygon.points.len() < 3 {
        return None;
    }

    let geo_polygon = polygon.to_geo_polygon();
    let rect = geo_polygon.minimum_rotated_rect()?;
    let hull = geo_polygon.convex_hull();

    // The rectangle ring is closed; the fifth coordinate repeats the first.
    let mut corners = [(0.0, 0.0); 4];
    for (corner, coord) in corners.iter_mut().zip(rect.exterior().coords()) {
        *corner = (coord.x, coord.y);
    }

    Some(RectangleFit {
        corners,
        polygon_area: geo_polygon.unsigned_area(),
        rectangle_area: rect.unsigned_area(),
        hull_area: hull.unsigned_area(),
    })
}
