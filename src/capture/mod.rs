//! Source image handling
//!
//! This module consolidates:
//! - Shared source image type (image.rs)
//! - Scaled rendition cache (cache.rs)
//! - Region cropping (crop.rs)

pub mod cache;
pub mod crop;
pub mod image;
