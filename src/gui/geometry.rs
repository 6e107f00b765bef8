//! Window coordinates and debounced writes of window geometry and style

use eframe::egui::{Pos2, pos2};
use std::time::{Duration, Instant};

use crate::types::WindowGeometry;

/// Holds back geometry updates until the window stops moving
#[derive(Debug)]
pub struct GeometryTracker {
    last: Option<WindowGeometry>,
    changed_at: Option<Instant>,
    delay: Duration,
}

impl GeometryTracker {
    pub fn new(initial: WindowGeometry, delay: Duration) -> Self {
        Self {
            last: Some(initial),
            changed_at: None,
            delay,
        }
    }

    pub fn observe(&mut self, geometry: WindowGeometry, now: Instant) {
        if self.last != Some(geometry) {
            self.last = Some(geometry);
            self.changed_at = Some(now);
        }
    }

    /// Geometry that has been stable for the delay, returned once
    pub fn settled(&mut self, now: Instant) -> Option<WindowGeometry> {
        let changed_at = self.changed_at?;
        if now.duration_since(changed_at) < self.delay {
            return None;
        }
        self.changed_at = None;
        self.last
    }

    /// Forget in-flight changes, e.g. while the window is fullscreen
    pub fn reset(&mut self, geometry: WindowGeometry) {
        self.last = Some(geometry);
        self.changed_at = None;
    }
}

/// Delays a save until edits have paused, e.g. while a color is dragged
#[derive(Debug)]
pub struct SaveDebounce {
    pending_since: Option<Instant>,
    delay: Duration,
}

impl SaveDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending_since: None,
            delay,
        }
    }

    /// Record an edit; each edit restarts the wait
    pub fn touch(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    /// True once the last edit is older than the delay
    pub fn due(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.delay => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending_since = None;
    }
}

/// Root-window pixel position to egui points relative to the window content.
/// `content_origin` is the viewport's inner rect origin, already in points
pub fn screen_to_window(pointer: (i32, i32), content_origin: Pos2, pixels_per_point: f32) -> Pos2 {
    pos2(
        pointer.0 as f32 / pixels_per_point - content_origin.x,
        pointer.1 as f32 / pixels_per_point - content_origin.y,
    )
}
