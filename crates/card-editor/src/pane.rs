//! Pane controller
//!
//! Sequences one editing pane: image intake, the detect round trip, editing,
//! and the warp round trip. Requests carry an [`ImageToken`] so that a reply
//! for an image the user has since replaced is dropped instead of being
//! applied to the new one.

use crate::constants::DEFAULT_WARP_PADDING_PX;
use crate::editor::Editor;
use crate::quad::Quad;
use crate::types::{Canvas, Result, Size};
use image::DynamicImage;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of the card a pane edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Front, Side::Back];

    pub fn name(self) -> &'static str {
        match self {
            Side::Front => "Front",
            Side::Back => "Back",
        }
    }
}

/// Identifies one loaded image within a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ImageToken(pub u64);

/// Fixed parameters sent with every warp request
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WarpSettings {
    pub padding_px: u32,
    pub refine: bool,
}

impl Default for WarpSettings {
    fn default() -> Self {
        Self {
            padding_px: DEFAULT_WARP_PADDING_PX,
            refine: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetectRequest {
    pub side: Side,
    pub token: ImageToken,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct WarpRequest {
    pub side: Side,
    pub token: ImageToken,
    /// Full-resolution source image, not the zoomed preview
    pub image: Arc<DynamicImage>,
    /// Corners in image pixel space
    pub quad: Quad,
    pub rotation_degrees: f32,
    pub padding_px: u32,
    pub refine: bool,
}

pub struct Pane {
    side: Side,
    editor: Editor,
    source: Option<Arc<DynamicImage>>,
    token: ImageToken,
    detecting: bool,
    warping: bool,
    result: Option<Vec<u8>>,
    last_error: Option<String>,
    pub rotation_degrees: f32,
    pub settings: WarpSettings,
}

impl Pane {
    pub fn new(side: Side, canvas: Canvas) -> Self {
        Self {
            side,
            editor: Editor::new(canvas),
            source: None,
            token: ImageToken::default(),
            detecting: false,
            warping: false,
            result: None,
            last_error: None,
            rotation_degrees: 0.0,
            settings: WarpSettings::default(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn token(&self) -> ImageToken {
        self.token
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn source(&self) -> Option<&Arc<DynamicImage>> {
        self.source.as_ref()
    }

    /// PNG bytes of the last successful warp
    pub fn result(&self) -> Option<&[u8]> {
        self.result.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting
    }

    pub fn is_warping(&self) -> bool {
        self.warping
    }

    pub fn can_warp(&self) -> bool {
        self.source.is_some() && self.editor.quad().is_some() && !self.warping
    }

    /// Decode a freshly picked image and prepare its detect request.
    ///
    /// On a decode failure the pane keeps whatever it showed before.
    pub fn open(&mut self, bytes: Vec<u8>) -> Result<DetectRequest> {
        let decoded = image::load_from_memory(&bytes)?;
        Ok(self.open_decoded(decoded, bytes))
    }

    /// Like [`Pane::open`] for an image decoded elsewhere, e.g. off the UI
    /// thread. `bytes` is the encoded form the image came from.
    pub fn open_decoded(&mut self, image: DynamicImage, bytes: Vec<u8>) -> DetectRequest {
        self.install_image(image);

        log::info!(
            "{}: loaded {}x{} image",
            self.side.name(),
            self.editor.image_size().map_or(0.0, |s| s.width),
            self.editor.image_size().map_or(0.0, |s| s.height),
        );

        self.detecting = true;
        DetectRequest {
            side: self.side,
            token: self.token,
            bytes,
        }
    }

    /// Install an already decoded image without a detect round trip.
    pub fn install_image(&mut self, image: DynamicImage) -> ImageToken {
        let size = Size::new(image.width() as f64, image.height() as f64);
        self.token = ImageToken(self.token.0 + 1);
        self.source = Some(Arc::new(image));
        self.editor.load_image(size);
        self.detecting = false;
        // A warp for the previous image can no longer land here
        self.warping = false;
        self.last_error = None;
        self.token
    }

    pub fn on_detected(&mut self, token: ImageToken, quad: Quad) -> bool {
        if !self.is_current(token, "detection") {
            return false;
        }
        self.detecting = false;
        self.editor.install_quad(quad)
    }

    pub fn on_detect_failed(&mut self, token: ImageToken, message: String) {
        if !self.is_current(token, "detection failure") {
            return;
        }
        log::warn!("{}: detection failed: {}", self.side.name(), message);
        self.detecting = false;
        self.last_error = Some(message);
    }

    /// Snapshot the current quad for a warp. Returns `None` when there is
    /// nothing to warp or a warp is already in flight.
    pub fn request_warp(&mut self) -> Option<WarpRequest> {
        if self.warping {
            log::debug!("{}: warp already in flight", self.side.name());
            return None;
        }
        let image = self.source.clone()?;
        let quad = *self.editor.quad()?;

        self.warping = true;
        self.last_error = None;
        Some(WarpRequest {
            side: self.side,
            token: self.token,
            image,
            quad,
            rotation_degrees: self.rotation_degrees,
            padding_px: self.settings.padding_px,
            refine: self.settings.refine,
        })
    }

    pub fn on_warped(&mut self, token: ImageToken, png: Vec<u8>) -> bool {
        if !self.is_current(token, "warp result") {
            return false;
        }
        self.warping = false;
        self.result = Some(png);
        log::info!("{}: card rectified", self.side.name());
        true
    }

    pub fn on_warp_failed(&mut self, token: ImageToken, message: String) {
        if !self.is_current(token, "warp failure") {
            return;
        }
        log::warn!("{}: warp failed: {}", self.side.name(), message);
        self.warping = false;
        self.last_error = Some(message);
    }

    fn is_current(&self, token: ImageToken, what: &str) -> bool {
        if token == self.token && self.source.is_some() {
            return true;
        }
        log::debug!(
            "{}: discarding stale {} for {:?} (current {:?})",
            self.side.name(),
            what,
            token,
            self.token
        );
        false
    }
}
