use foundation::coords::NormalizedPoint;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PositionMarkerView {
    pub position: NormalizedPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
    /// Degrees clockwise from north, in `[0, 360)`; `None` hides the arrow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PulseView {
    pub center: NormalizedPoint,
    pub radius_m: f64,
}

/// Snapshot of the user-location layer. The tracker owns the underlying
/// state; surfaces only ever see these copies.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct LocationOverlay {
    pub marker: Option<PositionMarkerView>,
    pub pulse: Option<PulseView>,
}

impl LocationOverlay {
    pub fn is_empty(&self) -> bool {
        self.marker.is_none() && self.pulse.is_none()
    }
}
