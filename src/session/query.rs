//! Read-only views of the editor for hosts and renderers
//!
//! Rectangles are converted to original-image space on demand. Crops come
//! from the full-resolution source, never the scaled rendition.

use image::RgbaImage;

use super::editor::RoiEditor;
use crate::capture::crop::crop_image;
use crate::domain::{RoiRectangle, RoiSnapshot};

impl RoiEditor {
    pub(super) fn snapshot(&self, index: usize) -> Option<RoiSnapshot> {
        self.store
            .get(index)
            .map(|roi| self.snapshot_of(index, roi))
    }

    fn snapshot_of(&self, index: usize, roi: &RoiRectangle) -> RoiSnapshot {
        let display_rect = roi.bounds();
        let original_rect = self.transform.rect_to_original(display_rect);
        RoiSnapshot {
            index,
            type_name: roi.type_name.clone(),
            color: roi.color,
            original_rect,
            original_pixels: original_rect.to_pixel_rect(),
            display_rect,
            visible: roi.visible,
            selected: roi.selected,
            tag: roi.tag.clone(),
        }
    }

    /// Every ROI in insertion order
    pub fn rois(&self) -> Vec<RoiSnapshot> {
        self.store
            .iter()
            .enumerate()
            .map(|(index, roi)| self.snapshot_of(index, roi))
            .collect()
    }

    /// ROIs of one type, keeping their global indices
    pub fn rois_by_type(&self, type_name: &str) -> Vec<RoiSnapshot> {
        self.store
            .iter()
            .enumerate()
            .filter(|(_, roi)| roi.type_name == type_name)
            .map(|(index, roi)| self.snapshot_of(index, roi))
            .collect()
    }

    pub fn roi(&self, index: usize) -> Option<RoiSnapshot> {
        self.snapshot(index)
    }

    /// Source pixels under one ROI, clipped to the image
    pub fn roi_image(&self, index: usize) -> Option<RgbaImage> {
        let source = self.source.as_ref()?;
        let snapshot = self.snapshot(index)?;
        crop_image(source.rgba(), snapshot.original_pixels)
    }

    /// Crops grouped by type, types in order of first appearance.
    ///
    /// ROIs with an empty crop are skipped.
    pub fn roi_images_by_type(&self) -> Vec<(String, Vec<RgbaImage>)> {
        let mut groups: Vec<(String, Vec<RgbaImage>)> = Vec::new();
        let Some(source) = self.source.as_ref() else {
            return groups;
        };

        for (index, roi) in self.store.iter().enumerate() {
            let snapshot = self.snapshot_of(index, roi);
            let Some(crop) = crop_image(source.rgba(), snapshot.original_pixels) else {
                continue;
            };
            match groups.iter_mut().find(|(name, _)| *name == roi.type_name) {
                Some((_, images)) => images.push(crop),
                None => groups.push((roi.type_name.clone(), vec![crop])),
            }
        }
        groups
    }
}
