use foundation::bounds::Recenter;
use foundation::coords::NormalizedPoint;
use runtime::notices::NoticeLevel;

/// Location tracker lifecycle:
/// Idle → PermissionRequested → Acquiring → Tracking → Idle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Idle,
    PermissionRequested,
    Acquiring,
    Tracking,
}

/// Identity of the single outstanding platform request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Capability {
    Geolocation,
    Orientation,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Geolocation => f.write_str("location"),
            Capability::Orientation => f.write_str("compass"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    Denied(Capability),
    Unsupported(Capability),
    /// The platform accepted the request but could not deliver (timeout,
    /// position unavailable).
    Platform { capability: Capability, message: String },
}

impl PermissionError {
    pub fn capability(&self) -> Capability {
        match self {
            PermissionError::Denied(c) | PermissionError::Unsupported(c) => *c,
            PermissionError::Platform { capability, .. } => *capability,
        }
    }
}

impl std::fmt::Display for PermissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionError::Denied(c) => write!(f, "{c} access was denied"),
            PermissionError::Unsupported(c) => write!(f, "{c} is not available on this device"),
            PermissionError::Platform { capability, message } => {
                write!(f, "{capability} failed: {message}")
            }
        }
    }
}

impl std::error::Error for PermissionError {}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionFix {
    pub point: NormalizedPoint,
    pub accuracy_m: Option<f64>,
}

impl PositionFix {
    pub fn new(point: NormalizedPoint) -> Self {
        Self {
            point,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }
}

/// Platform callbacks fed to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    GeolocationPermission {
        request: RequestId,
        result: Result<(), PermissionError>,
    },
    /// Orientation permission is fire-and-forget and not tied to a slot.
    OrientationPermission { result: Result<(), PermissionError> },
    Position {
        request: RequestId,
        result: Result<PositionFix, PermissionError>,
    },
    Orientation { alpha: f64, screen_rotation: f64 },
}

/// Work the tracker asks its owner to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCommand {
    RequestGeolocationPermission(RequestId),
    RequestOrientationPermission,
    /// Start delivering fixes for `RequestId` until cancelled.
    RequestPosition(RequestId),
    CancelPosition(RequestId),
    Recenter(Recenter),
    Notice { level: NoticeLevel, message: String },
}

impl TrackerCommand {
    /// Commands only the platform host can carry out.
    pub fn is_platform_request(&self) -> bool {
        matches!(
            self,
            TrackerCommand::RequestGeolocationPermission(_)
                | TrackerCommand::RequestOrientationPermission
                | TrackerCommand::RequestPosition(_)
                | TrackerCommand::CancelPosition(_)
        )
    }
}
