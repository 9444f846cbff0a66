//! Frame clock for statistics
//!
//! The simulation advances one step per tick regardless of wall time, so this
//! clock never feeds the physics. It only measures how fast ticks arrive.

use std::time::{Duration, Instant};

/// Weight of the newest sample in the smoothed FPS estimate
const FPS_SMOOTHING: f64 = 0.1;

/// Counts frames and tracks frame timing
pub struct FrameClock {
    /// Number of ticks so far
    pub frame_count: u64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Total elapsed wall time in seconds
    pub total_time: f64,
    smoothed_fps: f64,
    last_instant: Instant,
    last_report: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            frame_count: 0,
            delta_time: 0.0,
            total_time: 0.0,
            smoothed_fps: 0.0,
            last_instant: now,
            last_report: now,
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock to an explicit instant
    pub fn tick_at(&mut self, now: Instant) {
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.last_report = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.delta_time = elapsed;
        self.total_time += elapsed;

        if elapsed > 0.0 {
            let instant_fps = 1.0 / elapsed;
            self.smoothed_fps = if self.smoothed_fps == 0.0 {
                instant_fps
            } else {
                self.smoothed_fps + (instant_fps - self.smoothed_fps) * FPS_SMOOTHING
            };
        }
    }

    /// Smoothed frames per second, 0 until two ticks have happened
    pub fn fps(&self) -> f64 {
        self.smoothed_fps
    }

    /// Returns true at most once per `interval`, measured from the last tick
    pub fn report_due(&mut self, interval: Duration) -> bool {
        if self.first_tick {
            return false;
        }
        if self.last_instant.saturating_duration_since(self.last_report) >= interval {
            self.last_report = self.last_instant;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count, 0);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.frame_count, 1);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_fps_tracks_frame_interval() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        for i in 0..=30u32 {
            clock.tick_at(start + Duration::from_millis(20) * i);
        }
        assert_eq!(clock.frame_count, 31);
        assert!((clock.fps() - 50.0).abs() < 0.5);
        assert!((clock.total_time - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_report_due_interval() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        assert!(!clock.report_due(Duration::from_secs(1)));
        clock.tick_at(start + Duration::from_millis(500));
        assert!(!clock.report_due(Duration::from_secs(1)));
        clock.tick_at(start + Duration::from_millis(1100));
        assert!(clock.report_due(Duration::from_secs(1)));
        assert!(!clock.report_due(Duration::from_secs(1)));
    }
}
