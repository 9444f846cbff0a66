//! Particle layer drawing

use crate::canvas::{Canvas, Circle};
use inkswarm_core::Color;
use inkswarm_particles::Particle;

/// Window geometry. `width`/`height` are logical pixels (the extraction
/// surface uses the same units); the visible surface is `size * device_pixel_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Visible surface size in device pixels
    pub fn device_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.device_pixel_ratio).round() as u32,
            (self.height as f32 * self.device_pixel_ratio).round() as u32,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(300, 150, 1.0)
    }
}

/// Turns particles into one filled path per frame
#[derive(Default)]
pub struct ParticleRenderer {
    circles: Vec<Circle>,
}

impl ParticleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear `canvas` and draw every visible particle. Returns how many were drawn.
    ///
    /// Positions are scaled by the device pixel ratio and by the ratio of the
    /// visible width to the extraction width; radii only by the device pixel ratio.
    pub fn render<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        particles: &[Particle],
        viewport: &Viewport,
        extraction_width: u32,
        color: Color,
    ) -> usize {
        canvas.clear();

        let dpr = viewport.device_pixel_ratio;
        let scale = if extraction_width == 0 {
            1.0
        } else {
            viewport.width as f32 / extraction_width as f32
        };

        self.circles.clear();
        self.circles.extend(
            particles
                .iter()
                .filter(|p| p.is_visible())
                .map(|p| Circle {
                    center: p.pos * dpr * scale,
                    radius: p.size * dpr,
                }),
        );

        canvas.fill_circles(&self.circles, color);
        self.circles.len()
    }

    /// Circles issued by the last [`render`](Self::render)
    pub fn last_circles(&self) -> &[Circle] {
        &self.circles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingCanvas {
        clears: usize,
        fills: Vec<(Vec<Circle>, Color)>,
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            (200, 100)
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn fill_circles(&mut self, circles: &[Circle], color: Color) {
            self.fills.push((circles.to_vec(), color));
        }
    }

    fn particle(x: f32, y: f32, size: f32) -> Particle {
        Particle {
            size,
            ..Particle::spawn(Vec2::new(x, y), 0, 1.0, 0)
        }
    }

    #[test]
    fn scales_centers_but_not_radii_by_extraction_ratio() {
        let mut canvas = RecordingCanvas::default();
        let mut renderer = ParticleRenderer::new();
        let viewport = Viewport::new(100, 50, 2.0);
        let particles = [particle(10.0, 5.0, 1.5), particle(1.0, 1.0, 0.0)];

        let drawn = renderer.render(&mut canvas, &particles, &viewport, 50, Color::WHITE);
        assert_eq!(drawn, 1);
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.fills.len(), 1);

        let (circles, color) = &canvas.fills[0];
        assert_eq!(*color, Color::WHITE);
        assert_eq!(circles[0].center, Vec2::new(40.0, 20.0));
        assert_eq!(circles[0].radius, 3.0);
    }

    #[test]
    fn empty_frame_still_clears_and_fills_once() {
        let mut canvas = RecordingCanvas::default();
        let mut renderer = ParticleRenderer::new();
        let drawn = renderer.render(&mut canvas, &[], &Viewport::default(), 300, Color::BLACK);
        assert_eq!(drawn, 0);
        assert_eq!(canvas.clears, 1);
        assert!(canvas.fills[0].0.is_empty());
    }

    #[test]
    fn viewport_device_size() {
        let viewport = Viewport::new(640, 360, 1.5);
        assert_eq!(viewport.device_size(), (960, 540));
        assert_eq!(Viewport::new(10, 10, 0.0).device_pixel_ratio, 1.0);
        assert_eq!(Viewport::new(10, 10, f32::NAN).device_pixel_ratio, 1.0);
        assert!(Viewport::new(0, 10, 1.0).is_empty());
    }
}
