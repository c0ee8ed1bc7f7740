//! Shared constants for the quad editor
//!
//! Zoom limits, gesture tolerances and overlay styling live here so the
//! transform, gesture and render code agree on them.

// =============================================================================
// Zoom
// =============================================================================

/// Smallest allowed zoom factor
pub const MIN_ZOOM: f64 = 0.2;

/// Largest allowed zoom factor
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplier applied by the zoom-in / zoom-out buttons
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

/// Wheel factor when scrolling toward the user (zoom in)
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Wheel factor when scrolling away from the user (zoom out)
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`.
///
/// NaN collapses to `MIN_ZOOM` so the viewport never leaves its bounds.
#[inline]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return MIN_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

// =============================================================================
// Gestures
// =============================================================================

/// Handle hit radius in canvas pixels at a 1:1 canvas-to-display ratio
pub const HANDLE_HIT_RADIUS: f64 = 36.0;

/// Floor for the starting distance of a pinch (canvas pixels)
pub const PINCH_MIN_DISTANCE: f64 = 1e-3;

// =============================================================================
// Overlay styling
// =============================================================================

/// Radius of a corner marker (canvas pixels)
pub const MARKER_RADIUS: f64 = 8.0;

/// Width of the quad outline and the marker rim (canvas pixels)
pub const OUTLINE_WIDTH: f64 = 2.0;

/// Quad outline colour (`#00a2ff`)
pub const OUTLINE_COLOR: [u8; 3] = [0x00, 0xa2, 0xff];

/// Marker fill colour (`#ff5757`)
pub const MARKER_FILL: [u8; 3] = [0xff, 0x57, 0x57];

/// Marker rim colour
pub const MARKER_RIM: [u8; 3] = [0xff, 0xff, 0xff];

// =============================================================================
// Warp defaults
// =============================================================================

/// Padding added around the rectified card (pixels)
pub const DEFAULT_WARP_PADDING_PX: u32 = 20;
