//! Glyph rasterization backends

use crate::font::FontBook;
use crate::surface::AlphaSurface;
use inkswarm_core::{FontWeight, TextSettings};
use rusttype::{point, Font, Scale};
use std::collections::HashSet;

/// Draws a single line of text into an alpha surface.
///
/// The origin is the left end of the baseline, as with a canvas `fillText`.
/// Output may differ between backends; only determinism per backend matters.
pub trait GlyphRasterizer {
    fn fill_text(
        &mut self,
        surface: &mut AlphaSurface,
        line: &str,
        x: f32,
        baseline_y: f32,
        settings: &TextSettings,
    );
}

/// TrueType/OpenType rasterizer backed by rusttype and the installed fonts
pub struct RusttypeRasterizer {
    book: FontBook,
    warned: HashSet<(String, FontWeight)>,
}

impl RusttypeRasterizer {
    pub fn new(book: FontBook) -> Self {
        Self {
            book,
            warned: HashSet::new(),
        }
    }

    pub fn font_book_mut(&mut self) -> &mut FontBook {
        &mut self.book
    }
}

impl Default for RusttypeRasterizer {
    fn default() -> Self {
        Self::new(FontBook::new())
    }
}

impl GlyphRasterizer for RusttypeRasterizer {
    fn fill_text(
        &mut self,
        surface: &mut AlphaSurface,
        line: &str,
        x: f32,
        baseline_y: f32,
        settings: &TextSettings,
    ) {
        if line.is_empty() || !(settings.font_size > 0.0) {
            return;
        }

        let Some(resolved) = self.book.resolve(&settings.font_family, settings.font_weight) else {
            let key = (settings.font_family.clone(), settings.font_weight);
            if self.warned.insert(key) {
                log::warn!(
                    "No font available for '{}'; text renders no targets",
                    settings.font_family
                );
            }
            return;
        };

        let scale = em_scale(&resolved.font, settings.font_size);
        for glyph in resolved.font.layout(line, scale, point(x, baseline_y)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                surface.blend(bb.min.x + gx as i32, bb.min.y + gy as i32, coverage);
            });
        }
    }
}

/// rusttype scales by ascent-to-descent height; convert an em size to that
fn em_scale(font: &Font<'_>, font_size: f32) -> Scale {
    let units_per_em = f32::from(font.units_per_em());
    let v = font.v_metrics_unscaled();
    let height = v.ascent - v.descent;
    if units_per_em <= 0.0 || height <= 0.0 {
        return Scale::uniform(font_size);
    }
    Scale::uniform(font_size * height / units_per_em)
}
