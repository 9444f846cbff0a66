//! Process-wide settings, loaded from and saved to TOML
//!
//! Settings come in three groups:
//! - `[text]` — how the text is laid out and rasterized into targets
//! - `[particles]` — spawn rate, lifetime and motion bounds of the swarm
//! - `[background]` — the gradient painted behind the particle layer
//!
//! Every field has a default, so partial files are fine:
//!
//! ```toml
//! [text]
//! font_size = 200
//! font_weight = "bold"
//!
//! [particles]
//! fill_color = "#ffe08a"
//! max_age = 400
//! ```

use crate::error::Result;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Font weight of the rendered text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Text layout parameters. Any change here invalidates the target list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Em size in pixels
    pub font_size: f32,
    /// Baseline-to-baseline distance in pixels
    pub line_height: f32,
    /// CSS-style comma-separated family list, first available wins
    pub font_family: String,
    pub font_weight: FontWeight,
    pub padding_left: f32,
    pub padding_top: f32,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_size: 320.0,
            line_height: 320.0,
            font_family: "Lato, Lucida Grande".to_string(),
            font_weight: FontWeight::Normal,
            padding_left: 40.0,
            padding_top: 60.0,
        }
    }
}

/// Swarm behaviour parameters. All motion values are per tick, not per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    #[serde(alias = "fill_style")]
    pub fill_color: Color,
    /// Number of targets per particle; the population cap is `targets / ratio`
    pub target_to_particle_ratio: f32,
    pub max_age: f32,
    pub max_add_per_frame: u32,
    pub age_per_frame_min: f32,
    pub age_per_frame_max: f32,
    /// Distance at which a young particle has shrunk to nothing
    pub max_distance_to_target: f32,
    pub max_size: f32,
    pub max_vel: f32,
    pub friction: f32,
    pub max_acc: f32,
    pub chaos_acc: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            target_to_particle_ratio: 2.0,
            max_age: 200.0,
            max_add_per_frame: 60,
            age_per_frame_min: 0.1,
            age_per_frame_max: 2.0,
            max_distance_to_target: 20.0,
            max_size: 2.0,
            max_vel: 2.0,
            friction: 0.004,
            max_acc: 0.004,
            chaos_acc: 0.001,
        }
    }
}

/// Linear gradient behind the particles, CSS `linear-gradient` angle semantics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    pub color1: Color,
    pub color2: Color,
    /// Degrees, 0 points up, 90 points right
    pub angle: f32,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            color1: Color::from_hex(0xFF5072),
            color2: Color::from_hex(0xFFA5C3),
            angle: 192.0,
        }
    }
}

/// All settings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub text: TextSettings,
    pub particles: ParticleSettings,
    #[serde(alias = "bg")]
    pub background: BackgroundSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Whether switching from `self` to `other` requires rebuilding the targets
    pub fn affects_targets(&self, other: &Settings) -> bool {
        self.text != other.text
    }

    /// Bound every numeric field to the range the control panel offers.
    ///
    /// Returns one human-readable line per adjusted field. The simulation does
    /// not depend on this; it exists so hand-edited files stay in a useful range.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut adjusted = Vec::new();

        let text = &mut self.text;
        bound(&mut adjusted, "text.font_size", &mut text.font_size, 0.0, 1000.0);
        bound(&mut adjusted, "text.line_height", &mut text.line_height, 0.0, 1000.0);
        bound(&mut adjusted, "text.padding_left", &mut text.padding_left, 0.0, 1000.0);
        bound(&mut adjusted, "text.padding_top", &mut text.padding_top, 0.0, 1000.0);

        let p = &mut self.particles;
        bound(
            &mut adjusted,
            "particles.target_to_particle_ratio",
            &mut p.target_to_particle_ratio,
            1.0,
            100.0,
        );
        bound(&mut adjusted, "particles.max_age", &mut p.max_age, 1.0, 3000.0);
        if !(1..=100).contains(&p.max_add_per_frame) {
            let bounded = p.max_add_per_frame.clamp(1, 100);
            adjusted.push(format!(
                "particles.max_add_per_frame: {} clamped to {}",
                p.max_add_per_frame, bounded
            ));
            p.max_add_per_frame = bounded;
        }
        bound(
            &mut adjusted,
            "particles.max_distance_to_target",
            &mut p.max_distance_to_target,
            1.0,
            100.0,
        );
        bound(&mut adjusted, "particles.max_size", &mut p.max_size, 1.0, 100.0);
        bound(&mut adjusted, "particles.max_vel", &mut p.max_vel, 0.1, 10.0);
        bound(&mut adjusted, "particles.friction", &mut p.friction, 0.0, 0.01);
        bound(&mut adjusted, "particles.max_acc", &mut p.max_acc, 0.0, 0.1);
        bound(&mut adjusted, "particles.chaos_acc", &mut p.chaos_acc, 0.0, 0.1);
        if p.age_per_frame_min > p.age_per_frame_max {
            std::mem::swap(&mut p.age_per_frame_min, &mut p.age_per_frame_max);
            adjusted.push("particles.age_per_frame_min/max: inverted range swapped".to_string());
        }

        bound(&mut adjusted, "background.angle", &mut self.background.angle, 0.0, 360.0);

        adjusted
    }
}

fn bound(adjusted: &mut Vec<String>, name: &str, value: &mut f32, min: f32, max: f32) {
    let bounded = if value.is_nan() { min } else { value.clamp(min, max) };
    if bounded != *value {
        adjusted.push(format!("{name}: {} clamped to {bounded}", *value));
        *value = bounded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let s = Settings::default();
        assert_eq!(s.text.font_size, 320.0);
        assert_eq!(s.text.padding_top, 60.0);
        assert_eq!(s.particles.max_add_per_frame, 60);
        assert!((s.particles.friction - 0.004).abs() < 1e-9);
        assert_eq!(s.particles.fill_color, Color::WHITE);
        assert_eq!(s.background.color1.to_hex_string(), "#ff5072");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml_str = r##"
[text]
font_size = 120
font_weight = "bold"

[particles]
fill_style = "#ffe08a"
max_age = 400
"##;
        let s = Settings::from_toml_str(toml_str).unwrap();
        assert_eq!(s.text.font_size, 120.0);
        assert_eq!(s.text.font_weight, FontWeight::Bold);
        assert_eq!(s.text.line_height, 320.0);
        assert_eq!(s.particles.fill_color.to_hex_string(), "#ffe08a");
        assert_eq!(s.particles.max_age, 400.0);
        assert_eq!(s.particles.max_add_per_frame, 60);
    }

    #[test]
    fn bg_alias_and_bad_color() {
        let s = Settings::from_toml_str("[bg]\nangle = 45\n").unwrap();
        assert_eq!(s.background.angle, 45.0);

        let err = Settings::from_toml_str("[particles]\nfill_color = \"#xyz\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let mut s = Settings::default();
        s.text.font_family = "DejaVu Sans".to_string();
        s.particles.chaos_acc = 0.01;
        let text = s.to_toml_string().unwrap();
        let back = Settings::from_toml_str(&text).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn only_text_changes_affect_targets() {
        let a = Settings::default();
        let mut b = a.clone();
        b.particles.max_vel = 5.0;
        b.background.angle = 10.0;
        assert!(!a.affects_targets(&b));
        b.text.padding_left = 0.0;
        assert!(a.affects_targets(&b));
    }

    #[test]
    fn sanitize_reports_adjustments() {
        let mut s = Settings::default();
        s.particles.max_vel = 50.0;
        s.particles.target_to_particle_ratio = 0.0;
        s.particles.age_per_frame_min = 3.0;
        s.particles.max_add_per_frame = 0;
        let adjusted = s.sanitize();
        assert_eq!(adjusted.len(), 4);
        assert_eq!(s.particles.max_vel, 10.0);
        assert_eq!(s.particles.target_to_particle_ratio, 1.0);
        assert_eq!(s.particles.max_add_per_frame, 1);
        assert!(s.particles.age_per_frame_min < s.particles.age_per_frame_max);

        let mut defaults = Settings::default();
        assert!(defaults.sanitize().is_empty());
    }
}
