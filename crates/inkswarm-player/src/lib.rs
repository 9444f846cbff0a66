//! Inkswarm Player - interactive text swarm window
//!
//! This crate provides the [`Swarm`] tick orchestrator and the
//! [`PlayerApp`] winit application that drives it.

mod player_app;
mod swarm;

pub use player_app::PlayerApp;
pub use swarm::{Swarm, TickStats};

use anyhow::{Context, Result};
use inkswarm_core::Settings;
use inkswarm_particles::ParticleRng;
use inkswarm_render::Viewport;
use inkswarm_runtime::{FileWatcher, WatchKind};
use inkswarm_text::{FontBook, RusttypeRasterizer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use winit::event_loop::{ControlFlow, EventLoop};

/// Text shown when none is given
pub const DEFAULT_TEXT: &str = "Hello";

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Load a settings file and clamp it to the supported ranges, logging every adjustment
pub fn load_settings(path: &Path) -> inkswarm_core::Result<Settings> {
    let mut settings = Settings::load(path)?;
    for note in settings.sanitize() {
        log::warn!("{}: {note}", path.display());
    }
    Ok(settings)
}

/// Font book with the system directories plus `extra_dirs`
pub fn font_book(extra_dirs: &[PathBuf]) -> FontBook {
    let mut book = FontBook::new();
    for dir in extra_dirs {
        book.add_dir(dir.clone());
    }
    book
}

/// Everything needed to open a player window
#[derive(Debug, Default)]
pub struct PlayerOptions {
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub text: Option<String>,
    pub text_path: Option<PathBuf>,
    pub font_dirs: Vec<PathBuf>,
    pub fullscreen: bool,
    /// Hot-reload the settings and text files on change
    pub watch: bool,
}

/// Open the window and run until it is closed
pub fn run(options: PlayerOptions) -> Result<()> {
    let text = match (&options.text, &options.text_path) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file {}", path.display()))?,
        (None, None) => DEFAULT_TEXT.to_string(),
    };

    let watcher = if options.watch {
        let mut watcher = FileWatcher::new(WATCH_DEBOUNCE).context("Failed to start file watcher")?;
        if let Some(path) = &options.settings_path {
            watcher
                .watch(path, WatchKind::Settings)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
        }
        if let Some(path) = &options.text_path {
            watcher
                .watch(path, WatchKind::Text)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
        }
        Some(watcher)
    } else {
        None
    };

    // Real size arrives with the window
    let swarm = Swarm::with_parts(
        options.settings,
        text,
        Viewport::new(0, 0, 1.0),
        RusttypeRasterizer::new(font_book(&options.font_dirs)),
        ParticleRng::from_os_rng(),
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(swarm, options.settings_path, watcher, options.fullscreen);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
