//! Viewport transform
//!
//! Maps between canvas pixels and image pixels for a given zoom and pan
//! offset. The scaled image is centered in the canvas and then shifted by the
//! offset:
//!
//! ```text
//! canvas = center_offset(zoom) + offset + image * zoom
//! center_offset(zoom) = ((canvas_w - image_w * zoom) / 2, (canvas_h - image_h * zoom) / 2)
//! ```
//!
//! Everything here is a pure function of its inputs. Wheel zoom and pinch zoom
//! both go through [`zoom_to`], so they share the same anchor math.

use crate::constants::clamp_zoom;
use crate::types::{Point, Size};

/// Zoom and pan state of one pane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    /// Pan offset in canvas pixels. Unbounded.
    pub offset: Point,
}

impl Viewport {
    pub fn new(zoom: f64, offset: Point) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            offset,
        }
    }

    /// Viewport that fits `image` inside `canvas` without upscaling
    pub fn fit(image: Size, canvas: Size) -> Self {
        let zoom = if image.is_empty() {
            1.0
        } else {
            1.0_f64.min((canvas.width / image.width).min(canvas.height / image.height))
        };
        Self::new(zoom, Point::ZERO)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, Point::ZERO)
    }
}

/// Canvas position of the image's top-left corner before panning
pub fn center_offset(zoom: f64, image: Size, canvas: Size) -> Point {
    Point::new(
        (canvas.width - image.width * zoom) / 2.0,
        (canvas.height - image.height * zoom) / 2.0,
    )
}

/// Canvas position of the image's top-left corner
pub fn image_origin(viewport: &Viewport, image: Size, canvas: Size) -> Point {
    center_offset(viewport.zoom, image, canvas) + viewport.offset
}

pub fn image_to_canvas(p: Point, viewport: &Viewport, image: Size, canvas: Size) -> Point {
    image_origin(viewport, image, canvas) + p * viewport.zoom
}

pub fn canvas_to_image(q: Point, viewport: &Viewport, image: Size, canvas: Size) -> Point {
    (q - image_origin(viewport, image, canvas)) * (1.0 / viewport.zoom)
}

/// Multiply the zoom by `factor`, keeping the image point under `anchor`
/// fixed on the canvas.
pub fn zoom_at(
    anchor: Point,
    factor: f64,
    viewport: &Viewport,
    image: Size,
    canvas: Size,
) -> Viewport {
    zoom_to(anchor, viewport.zoom * factor, viewport, image, canvas)
}

/// Set the zoom to `target` (clamped), keeping the image point under
/// `anchor` fixed on the canvas.
pub fn zoom_to(
    anchor: Point,
    target: f64,
    viewport: &Viewport,
    image: Size,
    canvas: Size,
) -> Viewport {
    let under_anchor = canvas_to_image(anchor, viewport, image, canvas);

    let mut next = Viewport::new(target, viewport.offset);
    let landed = image_to_canvas(under_anchor, &next, image, canvas);
    next.offset += anchor - landed;
    next
}

/// Axis-aligned rectangle covered by the image, in canvas pixels
pub fn image_rect(viewport: &Viewport, image: Size, canvas: Size) -> (Point, Size) {
    (
        image_origin(viewport, image, canvas),
        Size::new(image.width * viewport.zoom, image.height * viewport.zoom),
    )
}
