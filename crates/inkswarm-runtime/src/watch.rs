//! Hot reload of the settings and text files
//!
//! The debouncer runs its own thread. It only pushes raw events into a channel;
//! the tick owner calls [`FileWatcher::drain`] between ticks, so simulation
//! state is never touched off the main thread.

use inkswarm_core::{Result, SwarmError};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// What a watched file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    Settings,
    Text,
}

/// A change to one of the watched files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    SettingsChanged(PathBuf),
    TextChanged(PathBuf),
}

struct WatchedFile {
    kind: WatchKind,
    path: PathBuf,
    file_name: OsString,
}

/// Debounced watcher for the settings and text files
pub struct FileWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<DebounceEventResult>,
    watched: Vec<WatchedFile>,
}

impl FileWatcher {
    pub fn new(debounce: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let debouncer = new_debouncer(debounce, tx)
            .map_err(|e| SwarmError::WatchError(format!("failed to create watcher: {e}")))?;
        Ok(Self {
            debouncer,
            rx,
            watched: Vec::new(),
        })
    }

    /// Start watching `path`.
    ///
    /// The parent directory is watched rather than the file itself, because
    /// most editors save by writing a new file and renaming it over the old one.
    pub fn watch(&mut self, path: &Path, kind: WatchKind) -> Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| SwarmError::WatchError(format!("not a file: {}", path.display())))?
            .to_os_string();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        self.debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| SwarmError::WatchError(format!("failed to watch {}: {e}", dir.display())))?;

        log::info!("Watching {} for {:?} changes", path.display(), kind);
        self.watched.push(WatchedFile {
            kind,
            path: path.to_path_buf(),
            file_name,
        });
        Ok(())
    }

    /// Collect all changes since the last call, at most one event per file
    pub fn drain(&self) -> Vec<WatchEvent> {
        let mut changed = Vec::new();
        for result in self.rx.try_iter() {
            match result {
                Ok(events) => changed.extend(events.into_iter().map(|e| e.path)),
                Err(e) => log::warn!("Watch error: {e:?}"),
            }
        }
        classify(&self.watched, &changed)
    }
}

fn classify(watched: &[WatchedFile], changed: &[PathBuf]) -> Vec<WatchEvent> {
    watched
        .iter()
        .filter(|w| {
            changed
                .iter()
                .any(|p| p.file_name() == Some(w.file_name.as_os_str()))
        })
        .map(|w| match w.kind {
            WatchKind::Settings => WatchEvent::SettingsChanged(w.path.clone()),
            WatchKind::Text => WatchEvent::TextChanged(w.path.clone()),
        })
        .collect()
}
