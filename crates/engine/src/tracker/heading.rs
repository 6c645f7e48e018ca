use foundation::math::{display_heading, smooth_heading};

/// Heading shown on the position marker.
///
/// Readings are corrected for screen rotation and optionally low-passed along
/// the shortest arc. A denied orientation permission disables the filter
/// until the next `reset`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingFilter {
    smoothing: f64,
    enabled: bool,
    current: Option<f64>,
}

impl HeadingFilter {
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing,
            enabled: true,
            current: None,
        }
    }

    pub fn update(&mut self, raw_alpha: f64, screen_rotation: f64) -> Option<f64> {
        if !self.enabled || !raw_alpha.is_finite() || !screen_rotation.is_finite() {
            return self.current;
        }
        let target = display_heading(raw_alpha, screen_rotation);
        let next = match self.current {
            Some(prev) => smooth_heading(prev, target, self.smoothing),
            None => target,
        };
        self.current = Some(next);
        self.current
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.current = None;
    }

    pub fn reset(&mut self) {
        self.enabled = true;
        self.current = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current(&self) -> Option<f64> {
        self.current
    }
}
