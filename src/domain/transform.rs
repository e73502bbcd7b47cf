//! Mapping between original-image pixels and the letterboxed viewport
//!
//! The image is scaled uniformly to fit the viewport and centered, so it is
//! always fully visible. Float conversions are exact inverses of each other;
//! the integer pixel variants truncate and do not round-trip.

use super::geometry::{Point, Rect, RectF, Size};

/// Scale and centering offsets for one source/viewport pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    source: Size,
    destination: Size,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            source: Size::default(),
            destination: Size::default(),
        }
    }
}

impl CoordinateTransform {
    /// Build a transform fitting `source` into `destination`
    pub fn fit(source: Size, destination: Size) -> Self {
        let mut transform = Self::default();
        transform.calculate(source, destination);
        transform
    }

    /// Recompute scale and offsets.
    ///
    /// A degenerate source or destination falls back to identity so the
    /// scale stays positive.
    pub fn calculate(&mut self, source: Size, destination: Size) {
        self.source = source;
        self.destination = destination;

        if source.is_empty() || destination.is_empty() {
            self.scale = 1.0;
            self.offset_x = 0.0;
            self.offset_y = 0.0;
            return;
        }

        let scale_x = destination.width as f32 / source.width as f32;
        let scale_y = destination.height as f32 / source.height as f32;
        self.scale = scale_x.min(scale_y);

        let scaled_width = source.width as f32 * self.scale;
        let scaled_height = source.height as f32 * self.scale;
        self.offset_x = (destination.width as f32 - scaled_width) / 2.0;
        self.offset_y = (destination.height as f32 - scaled_height) / 2.0;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn source_size(&self) -> Size {
        self.source
    }

    pub fn destination_size(&self) -> Size {
        self.destination
    }

    pub fn point_to_display(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    pub fn point_to_original(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    pub fn rect_to_display(&self, r: RectF) -> RectF {
        RectF::new(
            r.x * self.scale + self.offset_x,
            r.y * self.scale + self.offset_y,
            r.width * self.scale,
            r.height * self.scale,
        )
    }

    pub fn rect_to_original(&self, r: RectF) -> RectF {
        RectF::new(
            (r.x - self.offset_x) / self.scale,
            (r.y - self.offset_y) / self.scale,
            r.width / self.scale,
            r.height / self.scale,
        )
    }

    /// Lossy integer variant of [`Self::rect_to_display`]
    pub fn pixel_rect_to_display(&self, r: Rect) -> Rect {
        self.rect_to_display(RectF::from(r)).to_pixel_rect()
    }

    /// Lossy integer variant of [`Self::rect_to_original`]
    pub fn pixel_rect_to_original(&self, r: Rect) -> Rect {
        self.rect_to_original(RectF::from(r)).to_pixel_rect()
    }

    /// Size of the image once scaled into the viewport, truncated
    pub fn scaled_image_size(&self) -> Size {
        Size::new(
            (self.source.width as f32 * self.scale) as u32,
            (self.source.height as f32 * self.scale) as u32,
        )
    }

    /// Where the image lands in the viewport; excludes the letterbox bands
    pub fn image_display_rect(&self) -> RectF {
        RectF::new(
            self.offset_x,
            self.offset_y,
            self.source.width as f32 * self.scale,
            self.source.height as f32 * self.scale,
        )
    }

    /// Integer variant of [`Self::image_display_rect`], used for blitting
    pub fn image_display_pixel_rect(&self) -> Rect {
        let size = self.scaled_image_size();
        Rect::from_xywh(
            self.offset_x as i32,
            self.offset_y as i32,
            size.width as i32,
            size.height as i32,
        )
    }
}
