//! Off-screen alpha surface that text is rasterized into

use image::{GrayImage, Luma};
use inkswarm_core::{Result, SwarmError, Target};
use std::path::Path;

/// Returns true when an 8-bit alpha value is more than half opaque
pub fn is_opaque(alpha: u8) -> bool {
    f32::from(alpha) > 255.0 / 2.0
}

/// A single-channel coverage buffer. Never displayed; only read back.
pub struct AlphaSurface {
    alpha: GrayImage,
}

impl AlphaSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            alpha: GrayImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.alpha.width()
    }

    pub fn height(&self) -> u32 {
        self.alpha.height()
    }

    /// Reset every pixel to fully transparent
    pub fn clear(&mut self) {
        self.alpha.fill(0);
    }

    /// Reallocate at a new size. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width() || height != self.height() {
            self.alpha = GrayImage::new(width, height);
        }
    }

    /// Composite `coverage` (0..1) onto the pixel with source-over alpha.
    /// Coordinates outside the surface are ignored.
    pub fn blend(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return;
        }
        let pixel = self.alpha.get_pixel_mut(x as u32, y as u32);
        let dst = f32::from(pixel.0[0]) / 255.0;
        let out = coverage + dst * (1.0 - coverage);
        *pixel = Luma([(out * 255.0).round() as u8]);
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.alpha.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    /// Every pixel more than half opaque, row-major with x varying fastest
    pub fn opaque_targets(&self) -> Vec<Target> {
        self.alpha
            .enumerate_pixels()
            .filter(|(_, _, p)| is_opaque(p.0[0]))
            .map(|(x, y, _)| Target::new(x, y))
            .collect()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.alpha
    }

    /// Write the coverage buffer as a grayscale PNG (debugging aid)
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.alpha.save(path).map_err(|e| {
            SwarmError::SurfaceError(format!("failed to write '{}': {}", path.display(), e))
        })
    }
}
