use card_editor::Quad;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image encode error: {0}")]
    Encode(String),
    #[error("Degenerate quad: {0}")]
    DegenerateQuad(String),
    #[error("Output too large: {0}")]
    TooLarge(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Outcome of card detection, in full-resolution image pixels
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detection {
    pub width: u32,
    pub height: u32,
    pub quad: Quad,
    /// False when no card outline was found and `quad` is the default box
    pub found: bool,
}

/// Parameters of a perspective correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpParams {
    /// Counter-clockwise rotation applied after rectification
    pub rotation_degrees: f32,
    pub padding_px: u32,
    /// Produce an RGBA result with transparent padding
    pub refine: bool,
}

impl Default for WarpParams {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            padding_px: 20,
            refine: true,
        }
    }
}
