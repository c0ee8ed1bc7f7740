use crate::constants::{BUTTON_ZOOM_STEP, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::gesture::{Effect, GestureMode, GestureState, PointerEvent, Scene};
use crate::quad::Quad;
use crate::types::{Canvas, Point, Size};
use crate::viewport::{Viewport, zoom_at};

/// Cursor affordance for the pane canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    /// Idle over the image, a press would pan
    Grab,
    /// A pan, drag or pinch is in progress
    Grabbing,
    /// Idle over a corner handle
    PointAtHandle,
}

/// Interactive state of one pane: the loaded image's size, the viewport, the
/// quad overlay and the gesture in progress.
///
/// Every mutating method returns `true` when the pane needs a repaint. With no
/// image loaded, edits are no-ops.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    image: Option<Size>,
    canvas: Canvas,
    viewport: Viewport,
    quad: Option<Quad>,
    gesture: GestureState,
    hover: Option<usize>,
}

impl Editor {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ..Default::default()
        }
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn quad(&self) -> Option<&Quad> {
        self.quad.as_ref()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn hovered_handle(&self) -> Option<usize> {
        self.hover
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.viewport.zoom() * 100.0).round() as u32
    }

    /// Start over with a new image: fit it to the canvas, drop the old quad
    /// and forget any gesture in progress.
    pub fn load_image(&mut self, size: Size) -> bool {
        log::debug!("Loading image {}x{}", size.width, size.height);
        self.image = Some(size);
        self.viewport = Viewport::fit(size, self.canvas.size);
        self.quad = None;
        self.gesture = GestureState::default();
        self.hover = None;
        true
    }

    /// Replace the overlay wholesale, cancelling a drag on the old one.
    pub fn install_quad(&mut self, quad: Quad) -> bool {
        if self.image.is_none() {
            return false;
        }
        self.quad = Some(quad);
        self.gesture = std::mem::take(&mut self.gesture).cancel_drag();
        self.hover = None;
        true
    }

    pub fn resize_canvas(&mut self, canvas: Canvas) -> bool {
        if self.canvas == canvas {
            return false;
        }
        self.canvas = canvas;
        self.image.is_some()
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_about_center(BUTTON_ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_about_center(1.0 / BUTTON_ZOOM_STEP)
    }

    fn zoom_about_center(&mut self, factor: f64) -> bool {
        let center = self.canvas.size.center();
        self.zoom_by(center, factor)
    }

    /// Wheel zoom anchored at the cursor. Positive `delta_y` means scrolling
    /// away from the user and zooms out.
    pub fn wheel(&mut self, anchor: Point, delta_y: f64) -> bool {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_by(anchor, factor)
    }

    fn zoom_by(&mut self, anchor: Point, factor: f64) -> bool {
        let Some(image) = self.image else {
            return false;
        };
        self.viewport = zoom_at(anchor, factor, &self.viewport, image, self.canvas.size);
        true
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let Some(image) = self.image else {
            return false;
        };

        let mut scene = Scene {
            viewport: &mut self.viewport,
            quad: self.quad.as_mut(),
            image,
            canvas: self.canvas,
        };
        let (next, effect) = std::mem::take(&mut self.gesture).step(&event, &mut scene);
        self.gesture = next;

        match effect {
            Effect::Repaint => true,
            Effect::Hover(handle) => {
                self.hover = handle;
                false
            }
            Effect::None => {
                if !self.gesture.is_idle() {
                    self.hover = None;
                }
                false
            }
        }
    }

    /// The pointer left the canvas without pressing
    pub fn pointer_left(&mut self) {
        self.hover = None;
    }

    pub fn cursor(&self) -> CursorIcon {
        if self.image.is_none() {
            return CursorIcon::Default;
        }
        match self.gesture.mode() {
            GestureMode::Idle if self.hover.is_some() => CursorIcon::PointAtHandle,
            GestureMode::Idle => CursorIcon::Grab,
            GestureMode::Dragging { .. }
            | GestureMode::Panning { .. }
            | GestureMode::Pinching(_) => CursorIcon::Grabbing,
        }
    }
}
