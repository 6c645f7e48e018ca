//! Live user-location layer.
//!
//! The tracker is a pure state machine: platform callbacks come in as
//! [`LocationEvent`]s and everything it wants done (permission and position
//! requests, recenters, notices) goes out as [`TrackerCommand`]s. It owns the
//! single position marker and the single acquisition pulse; surfaces only see
//! the [`LocationOverlay`] snapshot.

pub mod heading;
pub mod pulse;
pub mod state;

pub use heading::HeadingFilter;
pub use pulse::{Pulse, PulseConfig};
pub use state::*;

use foundation::bounds::Recenter;
use foundation::coords::NormalizedPoint;
use layers::location::{LocationOverlay, PositionMarkerView};
use runtime::notices::NoticeLevel;
use runtime::tick::Tick;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRACKING_ZOOM: f64 = 17.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub tracking_zoom: f64,
    /// 0 disables smoothing.
    pub heading_smoothing: f64,
    pub pulse: PulseConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracking_zoom: DEFAULT_TRACKING_ZOOM,
            heading_smoothing: 0.0,
            pulse: PulseConfig::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionMarker {
    /// Stable for as long as the marker exists; re-acquisition keeps it.
    pub serial: u64,
    pub position: NormalizedPoint,
    pub accuracy_m: Option<f64>,
}

#[derive(Debug)]
pub struct LocationTracker {
    config: TrackerConfig,
    state: TrackerState,
    next_request: u64,
    slot: Option<RequestId>,
    marker: Option<PositionMarker>,
    markers_created: u64,
    pulse: Option<Pulse>,
    heading: HeadingFilter,
}

impl LocationTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            state: TrackerState::Idle,
            next_request: 0,
            slot: None,
            marker: None,
            markers_created: 0,
            pulse: None,
            heading: HeadingFilter::new(config.heading_smoothing),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.slot
    }

    pub fn marker(&self) -> Option<&PositionMarker> {
        self.marker.as_ref()
    }

    pub fn markers_created(&self) -> u64 {
        self.markers_created
    }

    pub fn pulse(&self) -> Option<&Pulse> {
        self.pulse.as_ref()
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading.current()
    }

    pub fn overlay(&self) -> LocationOverlay {
        LocationOverlay {
            marker: self.marker.map(|m| PositionMarkerView {
                position: m.position,
                accuracy_m: m.accuracy_m,
                heading_deg: self.heading.current(),
            }),
            pulse: self.pulse.as_ref().map(Pulse::view),
        }
    }

    pub fn start(&mut self) -> Vec<TrackerCommand> {
        match self.state {
            TrackerState::PermissionRequested | TrackerState::Acquiring => {
                tracing::debug!(state = ?self.state, "start ignored, request pending");
                Vec::new()
            }
            TrackerState::Idle => {
                let id = self.issue();
                self.state = TrackerState::PermissionRequested;
                self.heading.reset();
                vec![
                    TrackerCommand::RequestGeolocationPermission(id),
                    TrackerCommand::RequestOrientationPermission,
                ]
            }
            TrackerState::Tracking => {
                let mut commands = Vec::new();
                if let Some(old) = self.slot {
                    commands.push(TrackerCommand::CancelPosition(old));
                }
                let id = self.issue();
                self.state = TrackerState::Acquiring;
                tracing::debug!(request = id.0, "re-acquiring position");
                commands.push(TrackerCommand::RequestPosition(id));
                commands
            }
        }
    }

    pub fn stop(&mut self) -> Vec<TrackerCommand> {
        let cancel = match self.state {
            TrackerState::Acquiring | TrackerState::Tracking => self.slot,
            _ => None,
        };
        self.reset_to_idle();
        cancel.map(TrackerCommand::CancelPosition).into_iter().collect()
    }

    pub fn handle(&mut self, event: LocationEvent) -> Vec<TrackerCommand> {
        match event {
            LocationEvent::GeolocationPermission { request, result } => {
                if self.state != TrackerState::PermissionRequested || self.slot != Some(request) {
                    tracing::debug!(request = request.0, "ignoring unmatched permission response");
                    return Vec::new();
                }
                match result {
                    Ok(()) => {
                        self.state = TrackerState::Acquiring;
                        vec![TrackerCommand::RequestPosition(request)]
                    }
                    Err(err) => self.fail(err),
                }
            }
            LocationEvent::OrientationPermission { result } => match result {
                Ok(()) => Vec::new(),
                Err(err) => {
                    self.heading.disable();
                    vec![TrackerCommand::Notice {
                        level: NoticeLevel::Info,
                        message: format!("{err}; heading display is off"),
                    }]
                }
            },
            LocationEvent::Position { request, result } => {
                let accepting = matches!(self.state, TrackerState::Acquiring | TrackerState::Tracking);
                if !accepting || self.slot != Some(request) {
                    tracing::debug!(request = request.0, "ignoring unmatched position response");
                    return Vec::new();
                }
                match result {
                    Ok(fix) => self.apply_fix(fix),
                    Err(err) => {
                        let mut commands = vec![TrackerCommand::CancelPosition(request)];
                        commands.extend(self.fail(err));
                        commands
                    }
                }
            }
            LocationEvent::Orientation {
                alpha,
                screen_rotation,
            } => {
                if self.state == TrackerState::Tracking {
                    self.heading.update(alpha, screen_rotation);
                }
                Vec::new()
            }
        }
    }

    /// Steps the acquisition pulse. Returns `true` if the overlay changed.
    pub fn advance(&mut self, tick: Tick) -> bool {
        let Some(pulse) = self.pulse.as_mut() else {
            return false;
        };
        if !pulse.advance(tick.time) {
            self.pulse = None;
        }
        true
    }

    fn issue(&mut self) -> RequestId {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.slot = Some(id);
        id
    }

    fn apply_fix(&mut self, fix: PositionFix) -> Vec<TrackerCommand> {
        match self.marker.as_mut() {
            Some(marker) => {
                marker.position = fix.point;
                marker.accuracy_m = fix.accuracy_m;
            }
            None => {
                self.markers_created += 1;
                self.marker = Some(PositionMarker {
                    serial: self.markers_created,
                    position: fix.point,
                    accuracy_m: fix.accuracy_m,
                });
            }
        }

        if self.state == TrackerState::Acquiring {
            self.pulse = Some(Pulse::new(fix.point, self.config.pulse));
            self.state = TrackerState::Tracking;
            tracing::info!(lat = fix.point.lat, lng = fix.point.lng, "position acquired");
        } else if let Some(pulse) = self.pulse.as_mut() {
            pulse.move_to(fix.point);
        }

        vec![TrackerCommand::Recenter(Recenter::new(
            fix.point,
            self.config.tracking_zoom,
        ))]
    }

    fn fail(&mut self, err: PermissionError) -> Vec<TrackerCommand> {
        tracing::warn!(state = ?self.state, "location tracking stopped: {err}");
        self.reset_to_idle();
        vec![TrackerCommand::Notice {
            level: NoticeLevel::Warning,
            message: err.to_string(),
        }]
    }

    fn reset_to_idle(&mut self) {
        self.state = TrackerState::Idle;
        self.slot = None;
        self.marker = None;
        self.pulse = None;
    }
}
