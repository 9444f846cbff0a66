//! Drawing surface abstraction and the tiny-skia implementation

use crate::context::RenderError;
use glam::Vec2;
use inkswarm_core::Color;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// A circle in device pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// The visible drawing surface. Sizes are in device pixels.
///
/// The particle layer only ever clears the surface and fills one compound
/// path per frame.
pub trait Canvas {
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to fully transparent
    fn clear(&mut self);

    /// Fill the union of `circles` as a single path with one color
    fn fill_circles(&mut self, circles: &[Circle], color: Color);
}

/// Anti-aliased software canvas backed by a tiny-skia pixmap
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    /// Reallocate for a new size. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            *self = Self::new(width, height)?;
        }
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl Canvas for PixmapCanvas {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_circles(&mut self, circles: &[Circle], color: Color) {
        let mut pb = PathBuilder::new();
        for circle in circles {
            pb.push_circle(circle.center.x, circle.center.y, circle.radius);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}
