//! Resize anchors and pointer feedback for the selected rectangle

/// Resize handle on a rectangle
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Body of the rectangle: moves instead of resizing
    #[default]
    None,
    TopLeft,
    TopCenter,
    TopRight,
    MiddleRight,
    BottomRight,
    BottomCenter,
    BottomLeft,
    MiddleLeft,
}

impl Anchor {
    /// Hit-test priority, clockwise from the top-left corner
    pub const HIT_ORDER: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleRight,
        Anchor::BottomRight,
        Anchor::BottomCenter,
        Anchor::BottomLeft,
        Anchor::MiddleLeft,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Anchor::TopLeft | Anchor::TopRight | Anchor::BottomRight | Anchor::BottomLeft
        )
    }

    /// Cursor shown when hovering this anchor
    pub fn cursor(self) -> CursorIcon {
        match self {
            Anchor::TopLeft | Anchor::BottomRight => CursorIcon::ResizeNwSe,
            Anchor::TopRight | Anchor::BottomLeft => CursorIcon::ResizeNeSw,
            Anchor::TopCenter | Anchor::BottomCenter => CursorIcon::ResizeVertical,
            Anchor::MiddleLeft | Anchor::MiddleRight => CursorIcon::ResizeHorizontal,
            Anchor::None => CursorIcon::Move,
        }
    }
}

/// Pointer shape requested by the editor; the host maps it to its toolkit
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    #[default]
    Default,
    Crosshair,
    Move,
    ResizeNwSe,
    ResizeNeSw,
    ResizeVertical,
    ResizeHorizontal,
}

/// Editor working mode
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ControlMode {
    /// Rectangles can be created and edited
    #[default]
    Configuration,
    /// Read-only viewer; input is ignored and rendering favors speed
    Display,
}
