//! Render loop
//!
//! [`repaint`] redraws one pane from scratch onto any [`Surface`]. The
//! geometry comes from the viewport transform; the surface only draws.

use crate::constants::{MARKER_FILL, MARKER_RADIUS, MARKER_RIM, OUTLINE_COLOR, OUTLINE_WIDTH};
use crate::editor::Editor;
use crate::quad::QUAD_POINTS;
use crate::types::{Point, Size};
use crate::viewport::image_rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: [u8; 3],
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: [u8; 3],
    pub rim: StrokeStyle,
}

pub const OUTLINE_STYLE: StrokeStyle = StrokeStyle {
    color: OUTLINE_COLOR,
    width: OUTLINE_WIDTH,
};

pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    fill: MARKER_FILL,
    rim: StrokeStyle {
        color: MARKER_RIM,
        width: OUTLINE_WIDTH,
    },
};

/// Drawing backend for one pane, in canvas pixels
pub trait Surface {
    fn clear(&mut self);

    /// Draw the pane's image scaled into the rectangle at `origin`
    fn draw_image(&mut self, origin: Point, size: Size);

    fn stroke_closed_path(&mut self, points: &[Point; QUAD_POINTS], style: StrokeStyle);

    fn fill_marker(&mut self, center: Point, radius: f64, style: MarkerStyle);
}

/// Redraw image and overlay. Nothing is drawn when no image is loaded.
pub fn repaint(editor: &Editor, surface: &mut impl Surface) {
    let Some(image) = editor.image_size() else {
        return;
    };
    let canvas = editor.canvas().size;

    surface.clear();

    let (origin, size) = image_rect(editor.viewport(), image, canvas);
    surface.draw_image(origin, size);

    if let Some(quad) = editor.quad() {
        let points = quad.canvas_points(editor.viewport(), image, canvas);
        surface.stroke_closed_path(&points, OUTLINE_STYLE);
        for p in points {
            surface.fill_marker(p, MARKER_RADIUS, MARKER_STYLE);
        }
    }
}
