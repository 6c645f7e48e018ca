use foundation::coords::NormalizedPoint;
use foundation::time::{Time, TimeSpan};
use layers::location::PulseView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    pub base_radius_m: f64,
    /// Radius change per step.
    pub step_m: f64,
    /// Step length in seconds.
    pub step_s: f64,
    pub duration_s: f64,
    /// Upper bound as a multiple of `base_radius_m`.
    pub max_factor: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            base_radius_m: 20.0,
            step_m: 4.0,
            step_s: 0.05,
            duration_s: 3.0,
            max_factor: 2.5,
        }
    }
}

impl PulseConfig {
    pub fn max_radius_m(&self) -> f64 {
        self.base_radius_m * self.max_factor
    }

    /// Radius after `steps` steps, bouncing between base and max.
    pub fn radius_after(&self, steps: u64) -> f64 {
        let range = self.max_radius_m() - self.base_radius_m;
        if !(range > 0.0) || !(self.step_m > 0.0) {
            return self.base_radius_m;
        }
        let travelled = (steps as f64 * self.step_m).rem_euclid(2.0 * range);
        let offset = if travelled <= range {
            travelled
        } else {
            2.0 * range - travelled
        };
        self.base_radius_m + offset
    }
}

/// Transient acquisition ring around a fresh fix.
///
/// The clock starts at the first tick seen after creation; the radius is a
/// pure function of the whole steps elapsed since then, so late or bunched
/// ticks land on the same radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Pulse {
    config: PulseConfig,
    center: NormalizedPoint,
    span: Option<TimeSpan>,
    radius_m: f64,
}

impl Pulse {
    pub fn new(center: NormalizedPoint, config: PulseConfig) -> Self {
        Self {
            config,
            center,
            span: None,
            radius_m: config.base_radius_m,
        }
    }

    pub fn center(&self) -> NormalizedPoint {
        self.center
    }

    pub fn move_to(&mut self, center: NormalizedPoint) {
        self.center = center;
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Updates the radius for `now`. Returns `false` once the pulse has run
    /// for its full duration.
    pub fn advance(&mut self, now: Time) -> bool {
        let span = *self
            .span
            .get_or_insert_with(|| TimeSpan::starting_at(now, self.config.duration_s));
        if span.is_over(now) {
            return false;
        }
        let steps = if self.config.step_s > 0.0 {
            (now.seconds_since(span.start) / self.config.step_s + 1e-9).floor() as u64
        } else {
            0
        };
        self.radius_m = self.config.radius_after(steps);
        true
    }

    pub fn view(&self) -> PulseView {
        PulseView {
            center: self.center,
            radius_m: self.radius_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pulse, PulseConfig};
    use foundation::coords::NormalizedPoint;
    use foundation::time::Time;
    use runtime::tick::Tick;

    fn here() -> NormalizedPoint {
        NormalizedPoint { lat: 48.85, lng: 2.35 }
    }

    #[test]
    fn radius_bounces_between_base_and_max() {
        let cfg = PulseConfig::default();
        assert_eq!(cfg.radius_after(0), 20.0);
        assert_eq!(cfg.radius_after(1), 24.0);
        // 30 m of range: 28 m up at step 7, reflected off the 50 m ceiling at step 8.
        assert_eq!(cfg.radius_after(7), 48.0);
        assert_eq!(cfg.radius_after(8), 48.0);
        assert_eq!(cfg.radius_after(15), 20.0);

        let radii: Vec<f64> = (0..200).map(|s| cfg.radius_after(s)).collect();
        assert!(radii.iter().all(|r| (20.0..=50.0).contains(r)));
    }

    #[test]
    fn pulse_oscillates_then_expires() {
        let cfg = PulseConfig::default();
        let mut pulse = Pulse::new(here(), cfg);
        let mut tick = Tick::new(0, cfg.step_s);

        assert!(pulse.advance(tick.time));
        assert_eq!(pulse.radius_m(), 20.0);

        let mut seen_max = 0.0_f64;
        while tick.time.0 < 2.9 {
            tick = tick.next();
            assert!(pulse.advance(tick.time));
            assert!(pulse.radius_m() >= cfg.base_radius_m);
            assert!(pulse.radius_m() <= cfg.max_radius_m());
            seen_max = seen_max.max(pulse.radius_m());
        }
        assert!(seen_max > 40.0);

        assert!(!pulse.advance(Time(3.0)));
    }

    #[test]
    fn late_ticks_jump_to_the_same_radius() {
        let cfg = PulseConfig::default();
        let mut stepped = Pulse::new(here(), cfg);
        let mut skipped = Pulse::new(here(), cfg);
        let start = Tick::new(0, cfg.step_s);
        stepped.advance(start.time);
        skipped.advance(start.time);

        let mut tick = start;
        for _ in 0..5 {
            tick = tick.next();
            stepped.advance(tick.time);
        }
        skipped.advance(tick.time);
        assert_eq!(stepped.radius_m(), skipped.radius_m());
        assert_eq!(stepped.radius_m(), 40.0);
    }
}
