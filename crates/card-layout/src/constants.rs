//! Page and card geometry constants
//!
//! All lengths are millimeters unless the name says otherwise.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Resolution at which embedded card images map one pixel to one point
pub const IMAGE_DPI: f32 = 72.0;

// =============================================================================
// Page and Card Dimensions
// =============================================================================

/// A4 page width
pub const A4_WIDTH_MM: f32 = 210.0;

/// A4 page height
pub const A4_HEIGHT_MM: f32 = 297.0;

/// ISO/IEC 7810 ID-1 card width
pub const ID1_WIDTH_MM: f32 = 85.6;

/// ISO/IEC 7810 ID-1 card height
pub const ID1_HEIGHT_MM: f32 = 54.0;

/// Vertical gap between front and back
pub const DEFAULT_GAP_MM: f32 = 10.0;

// =============================================================================
// Output
// =============================================================================

pub const DEFAULT_PDF_NAME: &str = "idcard_a4.pdf";

pub const PDF_TITLE: &str = "ID card";

/// Page background while a side is still missing (#eeeeee)
pub const PLACEHOLDER_GRAY: [u8; 4] = [0xee, 0xee, 0xee, 0xff];

pub const PAGE_WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
