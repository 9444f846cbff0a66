//! Shared value types: colors and text targets

use crate::error::{Result, SwarmError};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// RGBA color, serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional)
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || SwarmError::InvalidColor(s.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;

        match digits.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xF) as f32 * 17.0 / 255.0;
                Ok(Self::new(nibble(8), nibble(4), nibble(0), 1.0))
            }
            6 => Ok(Self::from_hex(value)),
            8 => {
                let mut color = Self::from_hex(value >> 8);
                color.a = (value & 0xFF) as f32 / 255.0;
                Ok(color)
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8-bit straight (non-premultiplied) RGBA
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = SwarmError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

/// One opaque text pixel, in extraction-surface pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub x: u32,
    pub y: u32,
}

impl Target {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// An immutable, generation-tagged list of targets.
///
/// A list is never edited in place. Rebuilding the text produces a new list
/// with a higher generation, which replaces the old one wholesale. Cloning is
/// cheap (the points are shared).
#[derive(Clone, Debug)]
pub struct TargetList {
    points: Arc<[Target]>,
    generation: u64,
}

impl TargetList {
    pub fn new(points: Vec<Target>, generation: u64) -> Self {
        Self {
            points: Arc::from(points),
            generation,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolve an index. Stale indices from an older, longer list yield `None`.
    pub fn get(&self, index: usize) -> Option<Target> {
        self.points.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.points.iter()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Inclusive bounding box `(min, max)` of all targets
    pub fn bounds(&self) -> Option<(Target, Target)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), t| {
            (
                Target::new(min.x.min(t.x), min.y.min(t.y)),
                Target::new(max.x.max(t.x), max.y.max(t.y)),
            )
        }))
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF8844);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);
    }

    #[test]
    fn test_color_parse_forms() {
        assert_eq!(Color::parse("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("fff").unwrap(), Color::WHITE);
        let c = Color::parse("#ff507280").unwrap();
        assert_eq!(c.to_rgba8(), [0xff, 0x50, 0x72, 0x80]);
        assert!(Color::parse("#ff50").is_err());
        assert!(Color::parse("#gggggg").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_color_hex_string() {
        assert_eq!(Color::parse("#FFA5C3").unwrap().to_hex_string(), "#ffa5c3");
        assert_eq!(Color::TRANSPARENT.to_hex_string(), "#00000000");
    }

    #[test]
    fn test_target_list_lookup() {
        let list = TargetList::new(vec![Target::new(1, 2), Target::new(3, 4)], 7);
        assert_eq!(list.len(), 2);
        assert_eq!(list.generation(), 7);
        assert_eq!(list.get(1), Some(Target::new(3, 4)));
        assert_eq!(list.get(2), None);
        assert!(TargetList::empty().is_empty());
    }

    #[test]
    fn test_target_list_bounds() {
        let list = TargetList::new(
            vec![Target::new(5, 9), Target::new(2, 11), Target::new(8, 3)],
            1,
        );
        assert_eq!(list.bounds(), Some((Target::new(2, 3), Target::new(8, 11))));
        assert_eq!(TargetList::empty().bounds(), None);
    }
}
