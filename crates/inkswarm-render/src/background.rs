//! CSS-style two-color linear gradient background

use glam::Vec2;
use inkswarm_core::{BackgroundSettings, Color};
use tiny_skia::{GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode, Transform};

/// Endpoints of the gradient line for a CSS angle (0° points up, 90° right)
/// across a `width` x `height` box. The line passes through the center and is
/// long enough that both corners in its direction get the pure end colors.
pub fn gradient_line(angle_deg: f32, width: f32, height: f32) -> (Vec2, Vec2) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let dir = Vec2::new(sin, -cos);
    let half = (width * sin.abs() + height * cos.abs()) * 0.5;
    let center = Vec2::new(width, height) * 0.5;
    (center - dir * half, center + dir * half)
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Paint the background over white onto the whole pixmap
pub fn paint_background(pixmap: &mut Pixmap, background: &BackgroundSettings) {
    pixmap.fill(tiny_skia::Color::WHITE);

    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let Some(rect) = Rect::from_xywh(0.0, 0.0, w, h) else {
        return;
    };
    let (start, end) = gradient_line(background.angle, w, h);

    let shader = LinearGradient::new(
        Point::from_xy(start.x, start.y),
        Point::from_xy(end.x, end.y),
        vec![
            GradientStop::new(0.0, skia_color(background.color1)),
            GradientStop::new(1.0, skia_color(background.color2)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );

    let mut paint = Paint::default();
    match shader {
        Some(shader) => paint.shader = shader,
        None => paint.set_color(skia_color(background.color1)),
    }
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green_at(pixmap: &Pixmap, x: u32, y: u32) -> i32 {
        pixmap.pixel(x, y).unwrap().demultiply().green() as i32
    }

    #[test]
    fn gradient_line_for_cardinal_angles() {
        let (s, e) = gradient_line(180.0, 10.0, 100.0);
        assert!((s - Vec2::new(5.0, 0.0)).length() < 1e-4);
        assert!((e - Vec2::new(5.0, 100.0)).length() < 1e-4);

        let (s, e) = gradient_line(90.0, 10.0, 100.0);
        assert!((s - Vec2::new(0.0, 50.0)).length() < 1e-4);
        assert!((e - Vec2::new(10.0, 50.0)).length() < 1e-4);

        let (s, e) = gradient_line(0.0, 10.0, 100.0);
        assert!((s - Vec2::new(5.0, 100.0)).length() < 1e-4);
        assert!((e - Vec2::new(5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn diagonal_line_reaches_corners() {
        let (s, e) = gradient_line(45.0, 100.0, 100.0);
        // both corners project onto the line ends
        let dir = (e - s).normalize();
        assert!((Vec2::new(0.0, 100.0) - s).dot(dir).abs() < 1e-3);
        assert!((Vec2::new(100.0, 0.0) - e).dot(dir).abs() < 1e-3);
    }

    #[test]
    fn vertical_gradient_runs_top_to_bottom() {
        let mut pixmap = Pixmap::new(8, 100).unwrap();
        let bg = BackgroundSettings {
            angle: 180.0,
            ..Default::default()
        };
        paint_background(&mut pixmap, &bg);

        let [_, top_g, _, _] = bg.color1.to_rgba8();
        let [_, bottom_g, _, _] = bg.color2.to_rgba8();
        assert!((green_at(&pixmap, 4, 0) - top_g as i32).abs() <= 3);
        assert!((green_at(&pixmap, 4, 99) - bottom_g as i32).abs() <= 3);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
    }
}
