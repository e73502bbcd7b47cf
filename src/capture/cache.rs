//! Lazily rebuilt scaled rendition of the source image

use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::image::SourceImage;
use crate::domain::{ControlMode, Size};

/// The source image plus at most one rendition sized for the viewport
#[derive(Default)]
pub struct ImageCache {
    source: Option<SourceImage>,
    scaled: Option<(Size, FilterType, RgbaImage)>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the source; a different image drops the rendition
    pub fn set_source(&mut self, source: Option<SourceImage>) {
        let unchanged = match (&self.source, &source) {
            (Some(current), Some(new)) => current.same_as(new),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.scaled = None;
        }
        self.source = source;
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Rendition at exactly `size`, rebuilt when the size or the mode's
    /// filter changed.
    ///
    /// Returns `None` without an image or for a zero size.
    pub fn scaled(&mut self, size: Size, mode: ControlMode) -> Option<&RgbaImage> {
        let source = self.source.as_ref()?;
        if size.is_empty() {
            return None;
        }

        let filter = match mode {
            ControlMode::Configuration => FilterType::CatmullRom,
            ControlMode::Display => FilterType::Triangle,
        };
        let stale = !matches!(
            &self.scaled,
            Some((cached, cached_filter, _)) if *cached == size && *cached_filter == filter
        );
        if stale {
            // Release the old buffer before allocating the new one
            self.scaled = None;
            let resized = imageops::resize(source.rgba(), size.width, size.height, filter);
            log::debug!(
                "Rebuilt scaled image {}x{} ({filter:?})",
                size.width,
                size.height
            );
            self.scaled = Some((size, filter, resized));
        }

        self.scaled.as_ref().map(|(_, _, image)| image)
    }

    pub fn has_rendition(&self) -> bool {
        self.scaled.is_some()
    }
}
