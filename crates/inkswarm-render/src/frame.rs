//! Final frame: background plus particle layer

use crate::background::paint_background;
use crate::canvas::PixmapCanvas;
use crate::context::RenderError;
use image::{ImageFormat, Rgba, RgbaImage};
use inkswarm_core::BackgroundSettings;
use std::path::Path;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// Composites the particle layer over the gradient background.
///
/// The background is only repainted when its settings or the frame size change.
pub struct FrameComposer {
    frame: Pixmap,
    background: Pixmap,
    painted: Option<BackgroundSettings>,
}

impl FrameComposer {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let make = || Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height });
        Ok(Self {
            frame: make()?,
            background: make()?,
            painted: None,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    /// Build the frame for `layer`, resizing to match it when needed
    pub fn compose(
        &mut self,
        layer: &PixmapCanvas,
        background: &BackgroundSettings,
    ) -> Result<&Pixmap, RenderError> {
        let source = layer.pixmap();
        if self.size() != (source.width(), source.height()) {
            *self = Self::new(source.width(), source.height())?;
        }

        if self.painted.as_ref() != Some(background) {
            paint_background(&mut self.background, background);
            self.painted = Some(background.clone());
        }

        self.frame.data_mut().copy_from_slice(self.background.data());
        self.frame.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(&self.frame)
    }

    pub fn frame(&self) -> &Pixmap {
        &self.frame
    }

    /// Frame bytes as RGBA8. The frame is opaque, so these are not premultiplied.
    pub fn rgba(&self) -> &[u8] {
        self.frame.data()
    }

    pub fn to_image(&self) -> RgbaImage {
        pixmap_to_image(&self.frame)
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.to_image()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| RenderError::ImageEncode(format!("{}: {e}", path.display())))?;
        log::debug!("Wrote frame {}", path.display());
        Ok(())
    }
}

/// Straight-alpha copy of a pixmap
pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let c = pixmap
            .pixel(x, y)
            .map(|p| p.demultiply())
            .unwrap_or_else(|| tiny_skia::ColorU8::from_rgba(0, 0, 0, 0));
        Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}
