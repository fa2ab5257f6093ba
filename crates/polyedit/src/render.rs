use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use imageproc::point::Point;

use crate::types::Polygon;

/// Overlay palette, translated from the BGR constants of the source tool.
pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const SELECTED_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const VERTEX_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const DRAGGED_VERTEX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const RECTANGLE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Radius of the filled marker drawn at each vertex of the selected polygon.
pub const VERTEX_MARKER_RADIUS: i32 = 5;

/// Compose a fresh working image: the original frame, every polygon
/// outline, and vertex markers for the selected polygon only.
pub fn draw_overlays(
    original: &RgbImage,
    polygons: &[Polygon],
    selected: Option<usize>,
    dragging: Option<usize>,
) -> RgbImage {
    let mut canvas = original.clone();

    for (index, polygon) in polygons.iter().enumerate() {
        let color = if selected == Some(index) {
            SELECTED_COLOR
        } else {
            OUTLINE_COLOR
        };
        draw_ring(&mut canvas, &polygon.points, color);
    }

    if let Some(polygon) = selected.and_then(|index| polygons.get(index)) {
        for (index, point) in polygon.points.iter().enumerate() {
            let color = if dragging == Some(index) {
                DRAGGED_VERTEX_COLOR
            } else {
                VERTEX_COLOR
            };
            draw_filled_circle_mut(&mut canvas, (point.x, point.y), VERTEX_MARKER_RADIUS, color);
        }
    }

    canvas
}

/// Draw a fitted rectangle over the current working image.
pub fn draw_rectangle(canvas: &mut RgbImage, corners: &[(f64, f64); 4]) {
    for index in 0..4 {
        let (ax, ay) = corners[index];
        let (bx, by) = corners[(index + 1) % 4];
        draw_line_segment_mut(
            canvas,
            (ax as f32, ay as f32),
            (bx as f32, by as f32),
            RECTANGLE_COLOR,
        );
    }
}

/// Closed polygon outline: segments between consecutive vertices plus the
/// wrap-around edge.
fn draw_ring(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    if points.len() < 2 {
        return;
    }

    for index in 0..points.len() {
        let a = points[index];
        let b = points[(index + 1) % points.len()];
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at(x: i32, y: i32) -> Polygon {
        Polygon::new(vec![
            Point::new(x, y),
            Point::new(x + 10, y),
            Point::new(x + 10, y + 10),
            Point::new(x, y + 10),
        ])
    }

    #[test]
    fn test_selected_polygon_gets_markers_and_highlight() {
        let canvas = RgbImage::new(64, 64);
        let polygons = vec![square_at(10, 10), square_at(30, 30)];

        let drawn = draw_overlays(&canvas, &polygons, Some(0), Some(0));

        assert_eq!(
            drawn.get_pixel(10, 10),
            &DRAGGED_VERTEX_COLOR,
            "Dragged vertex marker sits on top of the outline"
        );
        assert_eq!(drawn.get_pixel(20, 20), &VERTEX_COLOR);
        assert_eq!(
            drawn.get_pixel(35, 30),
            &OUTLINE_COLOR,
            "Unselected outline keeps the plain color, no markers"
        );
    }

    #[test]
    fn test_unselected_render_leaves_background_untouched() {
        let canvas = RgbImage::new(64, 64);
        let polygons = vec![square_at(10, 10)];

        let drawn = draw_overlays(&canvas, &polygons, None, None);

        assert_eq!(drawn.get_pixel(15, 10), &OUTLINE_COLOR);
        assert_eq!(drawn.get_pixel(50, 50), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_rectangle_is_drawn_in_place() {
        let mut canvas = RgbImage::new(64, 64);
        draw_rectangle(&mut canvas, &[(5.0, 5.0), (25.0, 5.0), (25.0, 20.0), (5.0, 20.0)]);

        assert_eq!(canvas.get_pixel(15, 5), &RECTANGLE_COLOR);
        assert_eq!(canvas.get_pixel(5, 12), &RECTANGLE_COLOR);
    }
}
