//! ROI editing session
//!
//! This module contains:
//! - The interactive editor and its state machine
//! - Type registry and rectangle storage
//! - Message types for pointer, keyboard and domain events
//! - Read-only snapshot and crop queries

pub mod editor;
pub mod messages;
pub mod query;
pub mod registry;
pub mod shortcuts;
pub mod state;
pub mod store;

pub use editor::{EditorOptions, RoiEditor};
pub use messages::{EditorCommand, Key, PointerButton, PointerEvent, RoiEvent};
pub use registry::RoiTypeRegistry;
pub use state::InteractionState;
pub use store::RoiId;
