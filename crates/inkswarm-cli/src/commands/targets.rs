//! Targets command - extract and report text targets

use super::InputArgs;
use anyhow::{bail, Context, Result};
use inkswarm_core::TargetList;
use inkswarm_player::font_book;
use inkswarm_text::{RusttypeRasterizer, TargetExtractor};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

pub struct TargetsArgs {
    pub input: InputArgs,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub mask: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

#[derive(Debug, Serialize)]
struct TargetReport {
    width: u32,
    height: u32,
    lines: usize,
    count: usize,
    particles: usize,
    bounds: Option<Bounds>,
    elapsed_ms: f64,
}

impl TargetReport {
    fn new(args: &TargetsArgs, text: &str, targets: &TargetList, particles: usize, elapsed_ms: f64) -> Self {
        Self {
            width: args.width,
            height: args.height,
            lines: text.split('\n').count(),
            count: targets.len(),
            particles,
            bounds: targets.bounds().map(|(min, max)| Bounds {
                min_x: min.x,
                min_y: min.y,
                max_x: max.x,
                max_y: max.y,
            }),
            elapsed_ms,
        }
    }
}

pub fn run(args: TargetsArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Surface must be at least 1x1, got {}x{}", args.width, args.height);
    }

    let settings = args.input.load_settings()?;
    let text = args.input.load_text()?;

    let mut extractor = TargetExtractor::new(
        args.width,
        args.height,
        RusttypeRasterizer::new(font_book(&args.input.font_dirs)),
    );
    let started = Instant::now();
    let targets = extractor.extract(&text, &settings.text);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Some(path) = &args.mask {
        extractor
            .surface()
            .save_png(path)
            .with_context(|| format!("Failed to write mask {}", path.display()))?;
    }

    let particles = inkswarm_particles::population_cap(
        targets.len(),
        settings.particles.target_to_particle_ratio,
    );
    let report = TargetReport::new(&args, &text, &targets, particles, elapsed_ms);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("Surface:   {}x{}", report.width, report.height);
            println!("Lines:     {}", report.lines);
            println!("Targets:   {}", report.count);
            println!("Particles: {} (at ratio {})", report.particles, settings.particles.target_to_particle_ratio);
            match &report.bounds {
                Some(b) => println!(
                    "Bounds:    ({}, {}) - ({}, {})",
                    b.min_x, b.min_y, b.max_x, b.max_y
                ),
                None => println!("Bounds:    none"),
            }
            println!("Extracted in {:.2} ms", report.elapsed_ms);
            if let Some(path) = &args.mask {
                println!("Mask written to {}", path.display());
            }
        }
    }

    Ok(())
}
