use std::ops::{Add, AddAssign, Mul, Sub};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid quad: expected 4 points, got {0}")]
    QuadLength(usize),
    #[error("Invalid quad: point {0} is not finite")]
    QuadNotFinite(usize),
}

pub type Result<T> = std::result::Result<T, EditorError>;

/// A 2D position. The coordinate space (canvas or image) is implied by
/// where the value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Identity of one active pointer (mouse, pen or a single touch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// The drawing surface a pane renders into.
///
/// `size` is the backing-buffer size in canvas pixels; `css_scale` is the
/// ratio of canvas pixels to displayed pixels, used to keep hit tolerances
/// constant on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub size: Size,
    pub css_scale: f64,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            css_scale: 1.0,
        }
    }

    pub fn with_css_scale(mut self, css_scale: f64) -> Self {
        self.css_scale = css_scale;
        self
    }

    /// Handle hit radius expressed in canvas pixels
    pub fn hit_radius(&self) -> f64 {
        let scale = if self.css_scale.is_finite() && self.css_scale > 0.0 {
            self.css_scale
        } else {
            1.0
        };
        crate::constants::HANDLE_HIT_RADIUS * scale
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}
