//! Message types for the editor session
//!
//! This module contains:
//! - Pointer and keyboard input delivered by the host
//! - Commands produced by keyboard shortcuts
//! - Domain events raised by the editor

use crate::domain::{Point, RoiSnapshot};

// ============================================================================
// Input Types
// ============================================================================

/// Mouse or pen button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input in display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button went down at position
    Pressed { position: Point, button: PointerButton },
    /// Pointer moved; `primary_held` reports the primary button state
    Moved { position: Point, primary_held: bool },
    /// Button went up at position
    Released { position: Point, button: PointerButton },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Pressed { position, .. }
            | PointerEvent::Moved { position, .. }
            | PointerEvent::Released { position, .. } => position,
        }
    }

    pub fn press(x: f32, y: f32) -> Self {
        PointerEvent::Pressed {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn drag_to(x: f32, y: f32) -> Self {
        PointerEvent::Moved {
            position: Point::new(x, y),
            primary_held: true,
        }
    }

    pub fn hover(x: f32, y: f32) -> Self {
        PointerEvent::Moved {
            position: Point::new(x, y),
            primary_held: false,
        }
    }

    pub fn release(x: f32, y: f32) -> Self {
        PointerEvent::Released {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }
}

/// Keys the editor understands; hosts translate their own key codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Character(String),
    Other,
}

/// Editor command triggered by a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Remove the selected ROI
    DeleteSelected,
    /// Abort the draw in progress, or drop the selection
    Cancel,
}

// ============================================================================
// Domain Events
// ============================================================================

/// Change notification carrying a snapshot taken when it happened
#[derive(Debug, Clone, PartialEq)]
pub enum RoiEvent {
    Created(RoiSnapshot),
    Modified(RoiSnapshot),
    /// Snapshot index is the position the ROI held before removal
    Deleted(RoiSnapshot),
    Selected(RoiSnapshot),
}

impl RoiEvent {
    pub fn snapshot(&self) -> &RoiSnapshot {
        match self {
            RoiEvent::Created(s)
            | RoiEvent::Modified(s)
            | RoiEvent::Deleted(s)
            | RoiEvent::Selected(s) => s,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RoiEvent::Created(_) => "created",
            RoiEvent::Modified(_) => "modified",
            RoiEvent::Deleted(_) => "deleted",
            RoiEvent::Selected(_) => "selected",
        }
    }

    /// Whether the event changes what a host should persist
    pub fn is_mutation(&self) -> bool {
        !matches!(self, RoiEvent::Selected(_))
    }
}
