//! Source image shared between the editor, the cache and the host

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;

use crate::domain::Size;

/// Decoded RGBA image behind a shared handle.
///
/// Clones share pixels; [`SourceImage::same_as`] compares identity, not
/// content, so replacing the image always invalidates caches.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: Arc<RgbaImage>,
}

impl SourceImage {
    pub fn new(rgba: RgbaImage) -> Self {
        Self {
            rgba: Arc::new(rgba),
        }
    }

    /// Decode an image file into RGBA
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let rgba = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?
            .to_rgba8();
        log::debug!(
            "SourceImage loaded: {}x{} pixels from {}",
            rgba.width(),
            rgba.height(),
            path.display()
        );
        Ok(Self::new(rgba))
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True when both handles point at the same pixels
    pub fn same_as(&self, other: &SourceImage) -> bool {
        Arc::ptr_eq(&self.rgba, &other.rgba)
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(rgba: RgbaImage) -> Self {
        Self::new(rgba)
    }
}
