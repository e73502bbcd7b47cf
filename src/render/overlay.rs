//! Frame rendering for the ROI editor using tiny-skia
//!
//! Draws the letterboxed image and the rectangle overlay into an RGBA frame
//! of the viewport size. Only the editor's public queries are used, so any
//! host can swap this for its own toolkit.

use image::{Rgba, RgbaImage};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, label, outline};
use crate::capture::cache::ImageCache;
use crate::config::{RoiColor, RoiSelectConfig};
use crate::domain::{ControlMode, RectF};
use crate::session::RoiEditor;

/// What the overlay includes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub show_labels: bool,
    pub show_handles: bool,
    pub background: RoiColor,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RoiSelectConfig::default())
    }
}

impl From<&RoiSelectConfig> for RenderOptions {
    fn from(config: &RoiSelectConfig) -> Self {
        Self {
            show_labels: config.show_labels,
            show_handles: config.show_handles,
            background: config.background,
        }
    }
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = tiny_skia::IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

fn to_skia_rect(r: RectF) -> Option<tiny_skia::Rect> {
    let r = r.normalized();
    tiny_skia::Rect::from_xywh(r.x, r.y, r.width, r.height)
}

fn fill(pixmap: &mut Pixmap, r: RectF, [red, green, blue, alpha]: [u8; 4]) {
    if let Some(rect) = to_skia_rect(r) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(red, green, blue, alpha);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

fn stroke(pixmap: &mut Pixmap, r: RectF, [red, green, blue, alpha]: [u8; 4], width: f32) {
    let Some(path) = to_skia_rect(r).map(PathBuilder::from_rect) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(red, green, blue, alpha);
    paint.anti_alias = true;

    let stroke = Stroke {
        width,
        line_cap: LineCap::Square,
        line_join: LineJoin::Miter,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Draw one rectangle with its selection decorations and label plate
fn draw_roi(
    pixmap: &mut Pixmap,
    bounds: RectF,
    color: RoiColor,
    selected: bool,
    type_name: &str,
    handles: bool,
    options: &RenderOptions,
) {
    let rgba = color.to_rgba_u8();

    if selected {
        fill(pixmap, bounds, color.with_alpha(outline::SELECTED_FILL_ALPHA));
        stroke(pixmap, bounds, rgba, outline::SELECTED_THICKNESS);
    } else {
        stroke(pixmap, bounds, rgba, outline::THICKNESS);
    }

    if selected && handles {
        for handle in geometry::handle_rects(bounds) {
            fill(pixmap, handle, rgba);
            stroke(
                pixmap,
                handle,
                RoiColor::WHITE.to_rgba_u8(),
                outline::HANDLE_BORDER,
            );
        }
    }

    if options.show_labels {
        let plate = geometry::label_plate(bounds.normalized(), type_name);
        fill(pixmap, plate, RoiColor::WHITE.with_alpha(label::ALPHA));
        stroke(pixmap, plate, rgba, outline::THICKNESS);
    }
}

/// Render the editor's current frame.
///
/// The cache is synchronized with the editor's source image first, so the
/// scaled rendition is reused across frames until the image or the viewport
/// changes.
pub fn render_frame(editor: &RoiEditor, cache: &mut ImageCache, options: &RenderOptions) -> RgbaImage {
    let viewport = editor.viewport_size();
    let mut frame = RgbaImage::from_pixel(
        viewport.width,
        viewport.height,
        Rgba(options.background.to_rgba_u8()),
    );

    cache.set_source(editor.source_image().cloned());
    let transform = editor.transform();
    let mode = editor.options().mode;
    if let Some(scaled) = cache.scaled(transform.scaled_image_size(), mode) {
        let at = transform.image_display_pixel_rect();
        image::imageops::replace(&mut frame, scaled, at.left as i64, at.top as i64);
    }

    let handles = options.show_handles && mode == ControlMode::Configuration;
    let rois = editor.rois();
    let provisional = editor.state().provisional();
    if rois.is_empty() && provisional.is_none() {
        return frame;
    }

    with_pixmap(&mut frame, |pixmap| {
        for roi in rois.iter().filter(|r| r.visible) {
            draw_roi(
                pixmap,
                roi.display_rect,
                roi.color,
                roi.selected,
                &roi.type_name,
                handles,
                options,
            );
        }

        if let Some(roi) = provisional {
            stroke(
                pixmap,
                roi.bounds().normalized(),
                roi.color.to_rgba_u8(),
                outline::THICKNESS,
            );
        }
    });

    frame
}
