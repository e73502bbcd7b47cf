use crate::domain::{Anchor, RoiRectangle};
use crate::session::store::RoiId;

/// Pointer interaction mode of the editor
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Waiting for, or tracking, a draw of a new `type_name` rectangle
    Creating {
        type_name: String,
        /// Opened on pointer-down; may have negative extent until release
        provisional: Option<RoiRectangle>,
    },
    /// Moving the whole target rectangle
    Dragging { target: RoiId },
    /// Moving the target's edges owned by `anchor`
    Resizing { target: RoiId, anchor: Anchor },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, InteractionState::Creating { .. })
    }

    /// Type being drawn, if any
    pub fn creating_type(&self) -> Option<&str> {
        match self {
            InteractionState::Creating { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    /// Rectangle being drawn but not yet committed
    pub fn provisional(&self) -> Option<&RoiRectangle> {
        match self {
            InteractionState::Creating { provisional, .. } => provisional.as_ref(),
            _ => None,
        }
    }

    /// Rectangle being dragged or resized
    pub fn target(&self) -> Option<RoiId> {
        match *self {
            InteractionState::Dragging { target } | InteractionState::Resizing { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }
}
