//! Scalar and 2D helpers used by the simulation

use glam::Vec2;

/// Euclidean distance between two points
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Bound `value` to `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when `min > max` the result is `max`,
/// and a NaN `value` comes back as `min`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// With `clamp_result` the output is bounded to the output range, whichever
/// direction it runs in. A zero-width input range maps everything to `out_min`.
pub fn remap(
    value: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
    clamp_result: bool,
) -> f32 {
    if in_max == in_min {
        return out_min;
    }

    let result = (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min;

    if !clamp_result {
        return result;
    }

    if out_min > out_max {
        clamp(result, out_max, out_min)
    } else {
        clamp(result, out_min, out_max)
    }
}
