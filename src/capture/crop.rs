use image::RgbaImage;

use crate::domain::Rect;

/// Copy the part of `image` covered by `region`.
///
/// The region is clipped to the image first; returns `None` when nothing of
/// it lies inside.
pub fn crop_image(image: &RgbaImage, region: Rect) -> Option<RgbaImage> {
    let bounds = Rect::from_xywh(0, 0, image.width() as i32, image.height() as i32);
    let clipped = region.intersect(bounds)?;
    let dims = clipped.dimensions()?;
    let view = image::imageops::crop_imm(
        image,
        clipped.left as u32,
        clipped.top as u32,
        dims.width(),
        dims.height(),
    );
    Some(view.to_image())
}
