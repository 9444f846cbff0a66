//! Inkswarm Core - Foundational types for the Inkswarm text-particle engine
//!
//! This crate provides the types every other Inkswarm crate depends on:
//! - `Target` / `TargetList` - attraction points extracted from rasterized text
//! - `Color` - RGBA color with CSS hex parsing
//! - `Settings` - text, particle and background configuration (TOML)
//! - `math` - distance, clamp and range remapping
//! - Error types and Result alias

mod error;
pub mod math;
mod settings;
mod types;

pub use error::{Result, SwarmError};
pub use settings::{BackgroundSettings, FontWeight, ParticleSettings, Settings, TextSettings};
pub use types::{Color, Target, TargetList};

pub use glam::Vec2;
