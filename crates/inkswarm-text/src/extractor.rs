//! Text → target extraction

use crate::layout::layout_lines;
use crate::raster::{GlyphRasterizer, RusttypeRasterizer};
use crate::surface::AlphaSurface;
use inkswarm_core::{TargetList, TextSettings};
use std::time::Instant;

/// Rasterizes text off-screen and turns every opaque pixel into a target.
///
/// Each call to [`extract`](Self::extract) produces a brand-new list with the
/// next generation number.
pub struct TargetExtractor<R: GlyphRasterizer = RusttypeRasterizer> {
    surface: AlphaSurface,
    rasterizer: R,
    generation: u64,
}

impl TargetExtractor<RusttypeRasterizer> {
    /// Extractor using the installed system fonts
    pub fn with_system_fonts(width: u32, height: u32) -> Self {
        Self::new(width, height, RusttypeRasterizer::default())
    }
}

impl<R: GlyphRasterizer> TargetExtractor<R> {
    pub fn new(width: u32, height: u32, rasterizer: R) -> Self {
        Self {
            surface: AlphaSurface::new(width, height),
            rasterizer,
            generation: 0,
        }
    }

    /// Match the off-screen surface to the viewport. Takes effect on the next extract.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface.width(), self.surface.height())
    }

    /// Generation of the most recently produced list
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> &AlphaSurface {
        &self.surface
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    /// Render `text` and collect all pixels more than half opaque, row-major
    pub fn extract(&mut self, text: &str, settings: &TextSettings) -> TargetList {
        let started = Instant::now();
        self.surface.clear();

        let lines = layout_lines(text, settings);
        for line in &lines {
            self.rasterizer
                .fill_text(&mut self.surface, line.text, line.x, line.baseline_y, settings);
        }

        self.generation += 1;
        let targets = TargetList::new(self.surface.opaque_targets(), self.generation);

        log::debug!(
            "Extracted {} targets from {} line(s) on {}x{} in {:.2?} (generation {})",
            targets.len(),
            lines.len(),
            self.surface.width(),
            self.surface.height(),
            started.elapsed(),
            self.generation
        );
        targets
    }
}
