//! Region-of-interest editor core and a folder annotation host
//!
//! [`session::RoiEditor`] is renderer agnostic: hosts feed it pointer and key
//! events in viewport coordinates and read back snapshots in source image
//! pixels. [`render`] draws frames with tiny-skia and [`annotator`] persists
//! rectangles per image file.

pub mod annotator;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;
