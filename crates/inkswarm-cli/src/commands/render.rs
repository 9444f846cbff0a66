//! Headless render command - simulate N ticks and write PNG frames

use super::InputArgs;
use anyhow::{bail, Context, Result};
use inkswarm_particles::ParticleRng;
use inkswarm_player::{font_book, Swarm};
use inkswarm_render::{FrameComposer, PixmapCanvas, Viewport};
use inkswarm_text::RusttypeRasterizer;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct RenderArgs {
    pub input: InputArgs,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub dpr: f32,
    pub ticks: u32,
    pub every: Option<u32>,
    pub seed: Option<u64>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Viewport must be at least 1x1, got {}x{}", args.width, args.height);
    }
    if args.every == Some(0) {
        bail!("--every must be at least 1");
    }

    let settings = args.input.load_settings()?;
    let text = args.input.load_text()?;
    let viewport = Viewport::new(args.width, args.height, args.dpr);
    let rng = match args.seed {
        Some(seed) => ParticleRng::seeded(seed),
        None => ParticleRng::from_os_rng(),
    };

    let mut swarm = Swarm::with_parts(
        settings,
        text,
        viewport,
        RusttypeRasterizer::new(font_book(&args.input.font_dirs)),
        rng,
    );

    let (device_width, device_height) = viewport.device_size();
    let mut canvas = PixmapCanvas::new(device_width, device_height)
        .context("Failed to create particle layer")?;
    let mut composer = FrameComposer::new(device_width, device_height)
        .context("Failed to create frame buffer")?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    println!(
        "Rendering {} ticks at {}x{} ({}x{} device pixels), {} targets",
        args.ticks,
        args.width,
        args.height,
        device_width,
        device_height,
        swarm.system().targets().len()
    );

    let started = Instant::now();
    let mut written = 0;
    let mut last = None;
    for tick in 1..=args.ticks {
        let stats = swarm.tick(&mut canvas);
        last = Some(stats);

        if let Some(every) = args.every {
            if tick % every == 0 {
                composer.compose(&canvas, &swarm.settings().background)?;
                composer.save_png(&numbered_path(&args.output, tick))?;
                written += 1;
            }
        }
    }

    if args.every.is_none() {
        composer.compose(&canvas, &swarm.settings().background)?;
        composer
            .save_png(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        written = 1;
    }

    if let Some(stats) = last {
        println!(
            "Done in {:.2?}: {} particles ({} visible), {} frame(s) written",
            started.elapsed(),
            stats.alive,
            stats.visible,
            written
        );
    } else {
        println!("No ticks run, wrote the empty frame");
    }
    Ok(())
}

/// `out/frame.png` + 12 -> `out/frame-00012.png`
pub fn numbered_path(base: &Path, index: u32) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    base.with_file_name(format!("{stem}-{index:05}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_paths() {
        assert_eq!(
            numbered_path(Path::new("out/frame.png"), 12),
            PathBuf::from("out/frame-00012.png")
        );
        assert_eq!(
            numbered_path(Path::new("shot"), 3),
            PathBuf::from("shot-00003.png")
        );
    }
}
