//! ROI types, rectangles and the host-facing snapshot
//!
//! Rectangles live in display coordinates; snapshots carry both spaces.

use super::geometry::{Point, Rect, RectF};
use super::selection::Anchor;
use crate::config::RoiColor;

/// Side length of a resize handle in display pixels
pub const HANDLE_SIZE: f32 = 8.0;

/// Center point of the handle `anchor` on `bounds`
pub fn anchor_point(bounds: RectF, anchor: Anchor) -> Point {
    let RectF {
        x,
        y,
        width,
        height,
    } = bounds;
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;
    let right = x + width;
    let bottom = y + height;
    match anchor {
        Anchor::TopLeft => Point::new(x, y),
        Anchor::TopCenter => Point::new(cx, y),
        Anchor::TopRight => Point::new(right, y),
        Anchor::MiddleRight => Point::new(right, cy),
        Anchor::BottomRight => Point::new(right, bottom),
        Anchor::BottomCenter => Point::new(cx, bottom),
        Anchor::BottomLeft => Point::new(x, bottom),
        Anchor::MiddleLeft => Point::new(x, cy),
        Anchor::None => Point::new(cx, cy),
    }
}

/// Handle square of side [`HANDLE_SIZE`] centered on the anchor point
pub fn anchor_rect(bounds: RectF, anchor: Anchor) -> RectF {
    let p = anchor_point(bounds, anchor);
    RectF::new(
        p.x - HANDLE_SIZE / 2.0,
        p.y - HANDLE_SIZE / 2.0,
        HANDLE_SIZE,
        HANDLE_SIZE,
    )
}

/// A registered kind of region, e.g. "locator" or "defect"
#[derive(Clone, Debug, PartialEq)]
pub struct RoiType {
    pub name: String,
    pub color: RoiColor,
    pub description: String,
    /// `None` means unbounded
    pub max_count: Option<usize>,
    /// Number of live rectangles of this type
    pub current_count: usize,
    pub visible: bool,
}

impl RoiType {
    pub fn new(name: impl Into<String>, color: RoiColor, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            description: description.into(),
            max_count: None,
            current_count: 0,
            visible: true,
        }
    }

    /// Whether one more rectangle fits under the cardinality limit
    pub fn can_create(&self) -> bool {
        self.max_count
            .is_none_or(|max| self.current_count < max)
    }
}

/// An editable rectangle in display coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct RoiRectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Registry key, resolved at time of use
    pub type_name: String,
    /// Type color captured at creation; later type recolors do not apply
    pub color: RoiColor,
    pub selected: bool,
    pub visible: bool,
    pub tag: Option<String>,
}

impl RoiRectangle {
    pub fn new(bounds: RectF, type_name: impl Into<String>, color: RoiColor) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            type_name: type_name.into(),
            color,
            selected: false,
            visible: true,
            tag: None,
        }
    }

    pub fn bounds(&self) -> RectF {
        RectF::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_bounds(&mut self, bounds: RectF) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Center point of a handle
    pub fn anchor_point(&self, anchor: Anchor) -> Point {
        anchor_point(self.bounds(), anchor)
    }

    /// Square handle area centered on the anchor point
    pub fn anchor_rect(&self, anchor: Anchor) -> RectF {
        anchor_rect(self.bounds(), anchor)
    }

    /// First handle under `p` in [`Anchor::HIT_ORDER`], or `Anchor::None`.
    ///
    /// Handle squares include their top/left edges and exclude bottom/right.
    pub fn hit_anchor(&self, p: Point) -> Anchor {
        Anchor::HIT_ORDER
            .into_iter()
            .find(|&anchor| {
                let r = self.anchor_rect(anchor);
                p.x >= r.x && p.x < r.right() && p.y >= r.y && p.y < r.bottom()
            })
            .unwrap_or(Anchor::None)
    }

    /// Move the edges owned by `anchor`; `Anchor::None` translates.
    ///
    /// Does not normalize, so dimensions may go negative.
    pub fn resize(&mut self, anchor: Anchor, dx: f32, dy: f32) {
        match anchor {
            Anchor::None => {
                self.x += dx;
                self.y += dy;
            }
            Anchor::TopLeft => {
                self.x += dx;
                self.y += dy;
                self.width -= dx;
                self.height -= dy;
            }
            Anchor::TopCenter => {
                self.y += dy;
                self.height -= dy;
            }
            Anchor::TopRight => {
                self.y += dy;
                self.width += dx;
                self.height -= dy;
            }
            Anchor::MiddleRight => {
                self.width += dx;
            }
            Anchor::BottomRight => {
                self.width += dx;
                self.height += dy;
            }
            Anchor::BottomCenter => {
                self.height += dy;
            }
            Anchor::BottomLeft => {
                self.x += dx;
                self.width -= dx;
                self.height += dy;
            }
            Anchor::MiddleLeft => {
                self.x += dx;
                self.width -= dx;
            }
        }
    }

    pub fn normalize(&mut self) {
        let bounds = self.bounds().normalized();
        self.set_bounds(bounds);
    }

    /// Pin the origin inside `bounds` and pull the far edges in.
    ///
    /// Expects a normalized rectangle; width and height stay non-negative.
    pub fn clamp_to_bounds(&mut self, bounds: RectF) {
        self.x = self.x.clamp(bounds.x, bounds.right().max(bounds.x));
        self.y = self.y.clamp(bounds.y, bounds.bottom().max(bounds.y));
        if self.x + self.width > bounds.right() {
            self.width = (bounds.right() - self.x).max(0.0);
        }
        if self.y + self.height > bounds.bottom() {
            self.height = (bounds.bottom() - self.y).max(0.0);
        }
    }
}

/// Immutable view of one rectangle handed to hosts and event listeners
#[derive(Clone, Debug, PartialEq)]
pub struct RoiSnapshot {
    /// Position in insertion order at the time the snapshot was taken
    pub index: usize,
    pub type_name: String,
    pub color: RoiColor,
    /// Bounds in source-image pixels
    pub original_rect: RectF,
    /// `original_rect` truncated to whole pixels
    pub original_pixels: Rect,
    /// Bounds in viewport coordinates
    pub display_rect: RectF,
    pub visible: bool,
    pub selected: bool,
    pub tag: Option<String>,
}
