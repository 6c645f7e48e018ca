use foundation::time::Time;

/// Fixed-step tick used to drive short animations.
///
/// Ticks are derived purely from `(index, dt_s)` so an animation replays the
/// same way regardless of how late the host delivers them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tick {
    /// 0-based tick index.
    pub index: u64,
    /// Fixed step (seconds).
    pub dt_s: f64,
    /// Engine time at this tick (seconds).
    pub time: Time,
}

impl Tick {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    /// First tick at or after `time`.
    pub fn at_or_after(time: Time, dt_s: f64) -> Self {
        let index = if dt_s > 0.0 {
            (time.0 / dt_s).ceil().max(0.0) as u64
        } else {
            0
        };
        Self::new(index, dt_s)
    }
}
