//! Per-image rectangle list persisted next to the images

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::RectF;

/// File name of the list inside an image folder
pub const ANNOTATIONS_FILE: &str = "annotations.json";

/// Whole-pixel rectangle in original image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Nearest whole-pixel rectangle, so reloading and saving again is stable
    pub fn round(r: RectF) -> Self {
        Self::new(
            r.x.round() as i32,
            r.y.round() as i32,
            r.width.round() as i32,
            r.height.round() as i32,
        )
    }
}

impl From<PixelRect> for RectF {
    fn from(r: PixelRect) -> Self {
        RectF::new(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
    }
}

/// Rectangles keyed by image file name, in file name order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationList {
    images: BTreeMap<String, Vec<PixelRect>>,
}

impl AnnotationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read annotations: {}", path.display()))?;
        let list = serde_json::from_str(&json)
            .with_context(|| format!("Invalid annotations file: {}", path.display()))?;
        Ok(list)
    }

    /// Load the list of an image folder; missing or broken files give an
    /// empty list
    pub fn load_folder(folder: &Path) -> Self {
        let path = folder.join(ANNOTATIONS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(list) => {
                log::info!("Loaded annotations for {} images", list.len());
                list
            }
            Err(err) => {
                log::warn!("Error loading annotations, starting empty: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write annotations: {}", path.display()))?;
        log::info!("Saved annotations to {}", path.display());
        Ok(())
    }

    /// Replace the rectangles stored for `file`
    pub fn check_in(&mut self, file: &str, rects: Vec<PixelRect>) {
        self.images.insert(file.to_string(), rects);
    }

    /// Rectangles stored for `file`, empty if none
    pub fn check_out(&self, file: &str) -> Vec<PixelRect> {
        self.images.get(file).cloned().unwrap_or_default()
    }

    /// Add an empty entry for `file` unless one exists
    pub fn ensure(&mut self, file: &str) {
        self.images.entry(file.to_string()).or_default();
    }

    pub fn contains(&self, file: &str) -> bool {
        self.images.contains_key(file)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PixelRect])> {
        self.images
            .iter()
            .map(|(file, rects)| (file.as_str(), rects.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
