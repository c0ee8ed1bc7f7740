pub mod constants;
pub mod options;
pub mod pdf;
pub mod placement;
pub mod preview;
pub mod types;

pub use constants::DEFAULT_PDF_NAME;
pub use options::LayoutOptions;
pub use pdf::{export_pdf, write_pdf};
pub use placement::{orient_landscape, place_cards};
pub use preview::{compose_preview, preview};
pub use types::*;
