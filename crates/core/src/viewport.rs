use serde::{Deserialize, Serialize};

/// The visible slice of the build timeline.
///
/// Times are offsets in seconds from the start of the build; `scaling` is
/// pixels per second. Zoom and pan mutate this between passes, never during
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: f64,
    pub end: f64,
    pub scaling: f64,
}

impl Viewport {
    pub fn new(start: f64, end: f64, scaling: f64) -> Self {
        Self {
            start,
            end,
            scaling,
        }
    }

    pub fn to_pixels(&self, t: f64) -> f64 {
        t * self.scaling
    }

    /// Left edge of the visible window in pixels. Jobs that started earlier
    /// are drawn from here.
    pub fn minimum_left(&self) -> f64 {
        self.to_pixels(self.start)
    }

    /// Upper bound on any job width: the window width plus `headroom`, so
    /// long jobs end just past the right edge instead of exactly on it.
    pub fn max_width(&self, headroom: f64) -> f64 {
        self.scaling * self.duration() + headroom
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
