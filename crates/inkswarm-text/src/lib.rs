//! Inkswarm Text - turns text into particle targets
//!
//! Text is laid out line by line, rasterized into an off-screen alpha surface
//! and read back; every pixel more than half opaque becomes a [`Target`].
//!
//! The glyph backend is pluggable through [`GlyphRasterizer`]. The default
//! backend renders TrueType/OpenType faces found by [`FontBook`].
//!
//! [`Target`]: inkswarm_core::Target

mod extractor;
mod font;
mod layout;
mod raster;
mod surface;

pub use extractor::TargetExtractor;
pub use font::{parse_family_list, system_font_dirs, FontBook, ResolvedFont};
pub use layout::{layout_lines, LineLayout};
pub use raster::{GlyphRasterizer, RusttypeRasterizer};
pub use surface::{is_opaque, AlphaSurface};
