//! Quad overlay
//!
//! Four ordered corner points in image space. Index order is the polygon
//! order and the identity of each draggable handle.

use crate::types::{EditorError, Point, Result, Size};
use crate::viewport::{Viewport, image_to_canvas};

/// Number of corners in a quad
pub const QUAD_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[[f64; 2]; 4]", from = "[[f64; 2]; 4]")
)]
pub struct Quad {
    points: [Point; QUAD_POINTS],
}

impl Quad {
    pub fn new(points: [Point; QUAD_POINTS]) -> Self {
        Self { points }
    }

    /// Build a quad from detector output, rejecting anything that is not
    /// exactly four finite points.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self> {
        if pairs.len() != QUAD_POINTS {
            return Err(EditorError::QuadLength(pairs.len()));
        }
        let mut points = [Point::ZERO; QUAD_POINTS];
        for (i, pair) in pairs.iter().enumerate() {
            let p = Point::from(*pair);
            if !p.is_finite() {
                return Err(EditorError::QuadNotFinite(i));
            }
            points[i] = p;
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point; QUAD_POINTS] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Move corner `index`. Out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, p: Point) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = p;
        }
    }

    pub fn to_pairs(&self) -> [[f64; 2]; QUAD_POINTS] {
        self.points.map(<[f64; 2]>::from)
    }

    /// Corner positions in canvas space, in index order
    pub fn canvas_points(
        &self,
        viewport: &Viewport,
        image: Size,
        canvas: Size,
    ) -> [Point; QUAD_POINTS] {
        self.points
            .map(|p| image_to_canvas(p, viewport, image, canvas))
    }
}

impl From<[[f64; 2]; 4]> for Quad {
    fn from(pairs: [[f64; 2]; 4]) -> Self {
        Self::new(pairs.map(Point::from))
    }
}

impl From<Quad> for [[f64; 2]; 4] {
    fn from(quad: Quad) -> Self {
        quad.to_pairs()
    }
}

/// Index of the handle nearest to `canvas_point` that lies strictly within
/// `radius` canvas pixels. On equal distances the lowest index wins.
pub fn hit_test(
    canvas_point: Point,
    quad: &Quad,
    viewport: &Viewport,
    image: Size,
    canvas: Size,
    radius: f64,
) -> Option<usize> {
    let mut best = None;
    let mut best_distance = radius;

    for (i, handle) in quad.canvas_points(viewport, image, canvas).iter().enumerate() {
        let d = handle.distance(canvas_point);
        if d < best_distance {
            best_distance = d;
            best = Some(i);
        }
    }

    best
}
