//! Inkswarm Render - draws the swarm
//!
//! The particle layer is rasterized on the CPU with tiny-skia through the
//! [`Canvas`] trait, composited over a CSS-style gradient background, and
//! either written to PNG or uploaded to a wgpu surface by [`FramePresenter`].

mod background;
mod canvas;
mod context;
mod frame;
mod presenter;
mod renderer;

pub use background::{gradient_line, paint_background};
pub use canvas::{Canvas, Circle, PixmapCanvas};
pub use context::{RenderContext, RenderError};
pub use frame::{pixmap_to_image, FrameComposer};
pub use presenter::FramePresenter;
pub use renderer::{ParticleRenderer, Viewport};

#[cfg(test)]
mod tests {
    #[test]
    fn blit_shader_wgsl_parses() {
        let source = include_str!("blit.wgsl");
        naga::front::wgsl::parse_str(source).expect("blit.wgsl failed to parse");
    }
}
