//! Folder annotation host built on the ROI editor
//!
//! This module provides:
//! - Image folder listing
//! - The per-image rectangle list and its JSON file
//! - Text export and cropped-ROI export
//! - The session tying a folder, the list and an editor together

pub mod export;
pub mod files;
pub mod preview;
pub mod session;
pub mod store;

pub use session::AnnotatorSession;
pub use store::{AnnotationList, PixelRect};
