//! Inkswarm Runtime - host-side loop infrastructure
//!
//! - `FrameClock` — frame counting and FPS statistics (never feeds the physics)
//! - `FileWatcher` — debounced hot reload of the settings and text files

mod clock;
mod watch;

pub use clock::FrameClock;
pub use watch::{FileWatcher, WatchEvent, WatchKind};
