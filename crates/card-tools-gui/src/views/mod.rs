pub mod layout;
pub mod pane;

pub use layout::{LayoutState, request_preview, show_layout};
pub use pane::{IMAGE_EXTENSIONS, PaneView, show_pane};
