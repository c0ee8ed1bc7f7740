pub mod detect;
pub mod geometry;
pub mod types;
pub mod warp;

pub use detect::{MAX_DETECT_SIDE, detect, detect_in_image, detect_quad, fallback_quad};
pub use geometry::order_corners;
pub use types::*;
pub use warp::{MAX_OUTPUT_SIDE, encode_png, warp, warp_card, warp_card_png};
