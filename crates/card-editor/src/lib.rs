pub mod constants;
mod editor;
pub mod gesture;
mod pane;
pub mod quad;
pub mod render;
mod types;
pub mod viewport;

pub use editor::{CursorIcon, Editor};
pub use gesture::{Effect, GestureMode, GestureState, PinchStart, PointerEvent, PointerPhase};
pub use pane::{DetectRequest, ImageToken, Pane, Side, WarpRequest, WarpSettings};
pub use quad::{QUAD_POINTS, Quad, hit_test};
pub use render::{MarkerStyle, StrokeStyle, Surface, repaint};
pub use types::*;
pub use viewport::{Viewport, canvas_to_image, image_to_canvas, zoom_at, zoom_to};
