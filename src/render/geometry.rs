//! Overlay geometry shared by the frame renderer and hosts
//!
//! Hosts that draw label text themselves use [`label_plate`] to place it.

use crate::domain::{Anchor, RectF, anchor_rect};

/// Stroke and fill constants for rectangles
pub mod outline {
    /// Stroke width of an unselected rectangle
    pub const THICKNESS: f32 = 1.0;
    /// Stroke width of the selected rectangle
    pub const SELECTED_THICKNESS: f32 = 2.0;
    /// Alpha of the fill drawn inside the selected rectangle
    pub const SELECTED_FILL_ALPHA: u8 = 30;
    /// Border width around each handle
    pub const HANDLE_BORDER: f32 = 1.0;
}

/// Label plate constants
pub mod label {
    /// Approximate advance of one glyph at the label font size
    pub const CHAR_WIDTH: f32 = 7.0;
    /// Plate height
    pub const HEIGHT: f32 = 16.0;
    /// Horizontal padding on each side of the text
    pub const PADDING: f32 = 3.0;
    /// Plate background alpha over white
    pub const ALPHA: u8 = 200;
}

/// Plate behind a rectangle's label.
///
/// Sits on top of the rectangle, or just inside its top edge when there is
/// no room above.
pub fn label_plate(bounds: RectF, text: &str) -> RectF {
    let width = text.chars().count() as f32 * label::CHAR_WIDTH + label::PADDING * 2.0;
    let above = bounds.y - label::HEIGHT;
    let y = if above < 0.0 { bounds.y } else { above };
    RectF::new(bounds.x, y, width, label::HEIGHT)
}

/// Handle squares in hit-test order
pub fn handle_rects(bounds: RectF) -> [RectF; 8] {
    Anchor::HIT_ORDER.map(|anchor| anchor_rect(bounds, anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HANDLE_SIZE;

    #[test]
    fn plate_above_or_inside() {
        let plate = label_plate(RectF::new(10.0, 40.0, 100.0, 50.0), "part");
        assert_eq!(plate.y, 24.0);
        assert_eq!(plate.width, 4.0 * label::CHAR_WIDTH + 2.0 * label::PADDING);

        let plate = label_plate(RectF::new(10.0, 5.0, 100.0, 50.0), "part");
        assert_eq!(plate.y, 5.0);
    }

    #[test]
    fn handles_centered_on_anchors() {
        let rects = handle_rects(RectF::new(0.0, 0.0, 40.0, 20.0));
        assert_eq!(rects[0], RectF::new(-4.0, -4.0, HANDLE_SIZE, HANDLE_SIZE));
        // BottomRight
        assert_eq!(rects[4], RectF::new(36.0, 16.0, HANDLE_SIZE, HANDLE_SIZE));
    }
}
