use crate::options::LayoutOptions;
use crate::types::{CardRect, PagePlacement};
use image::DynamicImage;

/// Center both cards horizontally and the stacked pair vertically, front on
/// top.
pub fn place_cards(options: &LayoutOptions) -> PagePlacement {
    let stack_height = options.card_height_mm * 2.0 + options.gap_mm;
    let top = (options.page_height_mm - stack_height) / 2.0;
    let x = (options.page_width_mm - options.card_width_mm) / 2.0;

    let rect = |y_mm| CardRect {
        x_mm: x,
        y_mm,
        width_mm: options.card_width_mm,
        height_mm: options.card_height_mm,
    };

    PagePlacement {
        front: rect(top),
        back: rect(top + options.card_height_mm + options.gap_mm),
    }
}

/// Rotate a portrait image a quarter turn counter-clockwise.
pub fn orient_landscape(image: &DynamicImage) -> DynamicImage {
    if image.width() < image.height() {
        image.rotate270()
    } else {
        image.clone()
    }
}
