//! Overlay rendering module
//!
//! This module contains:
//! - Geometry shared between the frame renderer and host-side drawing
//! - Frame rendering using tiny-skia

pub mod geometry;
pub mod overlay;

pub use overlay::{RenderOptions, render_frame};
