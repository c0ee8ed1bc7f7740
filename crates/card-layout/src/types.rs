use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("The {0} card image is empty")]
    EmptyImage(&'static str),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Axis-aligned rectangle on the page, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl CardRect {
    /// Distance from the bottom page edge to the bottom of the card, for
    /// coordinate systems rooted at the lower-left corner.
    pub fn bottom_mm(&self, page_height_mm: f32) -> f32 {
        page_height_mm - self.y_mm - self.height_mm
    }

    /// Scale to a raster of `px_per_mm`, returning `(x, y, w, h)` in pixels.
    pub fn to_pixels(&self, px_per_mm: f32) -> (i64, i64, u32, u32) {
        (
            (self.x_mm * px_per_mm).round() as i64,
            (self.y_mm * px_per_mm).round() as i64,
            ((self.width_mm * px_per_mm).round() as u32).max(1),
            ((self.height_mm * px_per_mm).round() as u32).max(1),
        )
    }
}

/// Where the two sides of the card land on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub front: CardRect,
    pub back: CardRect,
}
