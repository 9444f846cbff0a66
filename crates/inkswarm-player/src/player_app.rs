//! Player application implementing winit ApplicationHandler
//!
//! Each redraw runs one swarm tick, composites the frame on the CPU and
//! presents it. Typing edits the text live.

use crate::swarm::Swarm;
use crate::load_settings;
use inkswarm_render::{FrameComposer, FramePresenter, PixmapCanvas, RenderContext, Viewport};
use inkswarm_runtime::{FileWatcher, FrameClock, WatchEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

const STATS_INTERVAL: Duration = Duration::from_secs(5);

pub struct PlayerApp {
    swarm: Swarm,
    pub settings_path: Option<PathBuf>,
    watcher: Option<FileWatcher>,
    clock: FrameClock,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    presenter: Option<FramePresenter>,
    canvas: Option<PixmapCanvas>,
    composer: Option<FrameComposer>,

    pub fullscreen: bool,
    error: Option<anyhow::Error>,
}

impl PlayerApp {
    pub fn new(
        swarm: Swarm,
        settings_path: Option<PathBuf>,
        watcher: Option<FileWatcher>,
        fullscreen: bool,
    ) -> Self {
        Self {
            swarm,
            settings_path,
            watcher,
            clock: FrameClock::new(),
            window: None,
            render_context: None,
            presenter: None,
            canvas: None,
            composer: None,
            fullscreen,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Inkswarm")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        if self.fullscreen {
            window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))?;
        self.presenter = Some(FramePresenter::new(
            &render_context.device,
            render_context.format(),
        ));
        self.render_context = Some(render_context);

        let size = window.inner_size();
        self.canvas = Some(PixmapCanvas::new(size.width.max(1), size.height.max(1))?);
        self.composer = Some(FrameComposer::new(size.width.max(1), size.height.max(1))?);
        self.sync_viewport();
        Ok(())
    }

    /// Match the swarm and the particle layer to the window
    fn sync_viewport(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        let scale = window.scale_factor();
        let logical = size.to_logical::<f64>(scale);
        let viewport = Viewport::new(
            logical.width.round() as u32,
            logical.height.round() as u32,
            scale as f32,
        );
        if viewport != self.swarm.viewport() {
            log::debug!(
                "Viewport {}x{} at {:.2}x",
                viewport.width,
                viewport.height,
                viewport.device_pixel_ratio
            );
            self.swarm.resize(viewport);
        }

        if let Some(canvas) = &mut self.canvas {
            if let Err(e) = canvas.resize(size.width, size.height) {
                log::warn!("Could not resize particle layer: {e}");
            }
        }
    }

    fn redraw(&mut self) {
        self.clock.tick();

        let (Some(canvas), Some(composer), Some(context), Some(presenter)) = (
            self.canvas.as_mut(),
            self.composer.as_mut(),
            self.render_context.as_mut(),
            self.presenter.as_mut(),
        ) else {
            return;
        };

        let stats = self.swarm.tick(canvas);

        match composer.compose(canvas, &self.swarm.settings().background) {
            Ok(frame) => {
                let (width, height) = (frame.width(), frame.height());
                if let Err(e) = presenter.present(context, frame.data(), width, height) {
                    log::warn!("Present failed: {e}");
                }
            }
            Err(e) => log::warn!("Frame composition failed: {e}"),
        }

        if self.clock.report_due(STATS_INTERVAL) {
            log::info!(
                "{:.1} fps, {} particles ({} visible), target generation {}",
                self.clock.fps(),
                stats.alive,
                stats.visible,
                stats.generation
            );
        }
    }

    fn reload_settings(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            log::info!("No settings file to reload");
            return;
        };
        match load_settings(&path) {
            Ok(settings) => {
                let rebuilt = self.swarm.apply_settings(settings);
                log::info!(
                    "Reloaded settings from {}{}",
                    path.display(),
                    if rebuilt { " (targets rebuilt)" } else { "" }
                );
            }
            Err(e) => log::warn!("Keeping current settings, {}: {e}", path.display()),
        }
    }

    fn reload_text(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Reloaded text from {}", path.display());
                self.swarm.set_text(text);
            }
            Err(e) => log::warn!("Could not read {}: {e}", path.display()),
        }
    }

    fn handle_watch_events(&mut self) {
        let events = match &self.watcher {
            Some(watcher) => watcher.drain(),
            None => return,
        };
        for event in events {
            match event {
                WatchEvent::SettingsChanged(path) => {
                    self.settings_path = Some(path);
                    self.reload_settings();
                }
                WatchEvent::TextChanged(path) => self.reload_text(&path),
            }
        }
    }

    /// Returns false when the key asks to quit
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        match &event.logical_key {
            Key::Named(NamedKey::Escape) => return false,
            Key::Named(NamedKey::F5) => self.reload_settings(),
            Key::Named(NamedKey::Enter) => self.edit_text(|text| text.push('\n')),
            Key::Named(NamedKey::Backspace) => self.edit_text(|text| {
                text.pop();
            }),
            _ => {
                if let Some(typed) = event.text.as_deref() {
                    let typed: String = typed.chars().filter(|c| !c.is_control()).collect();
                    if !typed.is_empty() {
                        self.edit_text(|text| text.push_str(&typed));
                    }
                }
            }
        }
        true
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.swarm.text().to_string();
        edit(&mut text);
        self.swarm.set_text(text);
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                log::error!("Failed to start player: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
                self.sync_viewport();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_viewport();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !self.handle_key(&event) {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.handle_watch_events();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
