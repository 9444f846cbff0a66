//! Tick orchestration: settings, text, targets, particles and drawing

use inkswarm_core::Settings;
use inkswarm_particles::{ParticleRng, ParticleSystem};
use inkswarm_render::{Canvas, ParticleRenderer, Viewport};
use inkswarm_text::{GlyphRasterizer, RusttypeRasterizer, TargetExtractor};
use std::time::Instant;

/// Per-tick counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub added: usize,
    pub removed: usize,
    pub alive: usize,
    pub visible: usize,
    pub generation: u64,
}

/// Owns everything a frame needs.
///
/// Target rebuilds happen synchronously inside [`set_text`](Self::set_text),
/// [`apply_settings`](Self::apply_settings) and [`resize`](Self::resize),
/// never inside [`tick`](Self::tick).
pub struct Swarm<R: GlyphRasterizer = RusttypeRasterizer> {
    settings: Settings,
    text: String,
    viewport: Viewport,
    extractor: TargetExtractor<R>,
    system: ParticleSystem,
    renderer: ParticleRenderer,
}

impl Swarm<RusttypeRasterizer> {
    /// Swarm drawing with the installed system fonts
    pub fn new(settings: Settings, text: impl Into<String>, viewport: Viewport) -> Self {
        Self::with_parts(
            settings,
            text,
            viewport,
            RusttypeRasterizer::default(),
            ParticleRng::from_os_rng(),
        )
    }
}

impl<R: GlyphRasterizer> Swarm<R> {
    pub fn with_parts(
        settings: Settings,
        text: impl Into<String>,
        viewport: Viewport,
        rasterizer: R,
        rng: ParticleRng,
    ) -> Self {
        let mut swarm = Self {
            settings,
            text: text.into(),
            viewport,
            extractor: TargetExtractor::new(viewport.width, viewport.height, rasterizer),
            system: ParticleSystem::with_rng(viewport.width, viewport.height, rng),
            renderer: ParticleRenderer::new(),
        };
        swarm.rebuild();
        swarm
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn extractor(&self) -> &TargetExtractor<R> {
        &self.extractor
    }

    pub fn extractor_mut(&mut self) -> &mut TargetExtractor<R> {
        &mut self.extractor
    }

    /// Replace the text. Rebuilds targets when it actually changed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.rebuild();
        }
    }

    /// Swap in new settings. Ages and positions are kept; targets are
    /// rebuilt only when text layout settings differ. Returns whether a
    /// rebuild happened.
    pub fn apply_settings(&mut self, settings: Settings) -> bool {
        let rebuild = self.settings.affects_targets(&settings);
        self.settings = settings;
        if rebuild {
            self.rebuild();
        }
        rebuild
    }

    /// Follow the window. A change of logical size resizes the extraction
    /// surface and rebuilds; a change of pixel ratio only affects drawing.
    pub fn resize(&mut self, viewport: Viewport) {
        let resized = (viewport.width, viewport.height) != (self.viewport.width, self.viewport.height);
        self.viewport = viewport;
        if resized {
            self.extractor.resize(viewport.width, viewport.height);
            self.system.set_area(viewport.width, viewport.height);
            self.rebuild();
        }
    }

    /// Re-extract targets from the current text and settings
    pub fn rebuild(&mut self) {
        let started = Instant::now();
        let targets = self.extractor.extract(&self.text, &self.settings.text);
        log::info!(
            "Rebuilt targets: {} line(s), {} targets, generation {} ({:.2?})",
            self.text.split('\n').count(),
            targets.len(),
            targets.generation(),
            started.elapsed()
        );
        self.system.replace_targets(targets);
    }

    /// One frame: population update, physics, then draw onto `canvas`
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> TickStats {
        let report = self.system.update(&self.settings.particles);
        let (extraction_width, _) = self.extractor.size();
        let visible = self.renderer.render(
            canvas,
            self.system.particles(),
            &self.viewport,
            extraction_width,
            self.settings.particles.fill_color,
        );

        TickStats {
            added: report.added,
            removed: report.removed,
            alive: self.system.len(),
            visible,
            generation: self.system.targets().generation(),
        }
    }
}
