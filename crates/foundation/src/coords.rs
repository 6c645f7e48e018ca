use serde::{Deserialize, Serialize};

pub const MAX_LAT_DEG: f64 = 90.0;
pub const MAX_LNG_DEG: f64 = 180.0;

/// Validated WGS84 position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub lat: f64,
    pub lng: f64,
}

impl NormalizedPoint {
    /// Validates an already-numeric position.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ParseError> {
        let lat = check_range(Axis::Lat, lat)?;
        let lng = check_range(Axis::Lng, lng)?;
        Ok(Self { lat, lng })
    }

    /// Textual form accepted back by [`normalize`].
    ///
    /// `f64` display is the shortest representation that parses back to the
    /// same value, so `normalize(to_raw(p)) == p` holds exactly.
    pub fn to_raw(&self) -> (String, String) {
        (self.lat.to_string(), self.lng.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Lat,
    Lng,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Lat => write!(f, "latitude"),
            Axis::Lng => write!(f, "longitude"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    NotANumber { axis: Axis, raw: String },
    OutOfRange { axis: Axis, value: f64 },
}

impl ParseError {
    pub fn axis(&self) -> Axis {
        match self {
            ParseError::NotANumber { axis, .. } | ParseError::OutOfRange { axis, .. } => *axis,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::NotANumber { axis, raw } => write!(f, "{axis} is not a number: {raw:?}"),
            ParseError::OutOfRange { axis, value } => write!(f, "{axis} out of range: {value}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses raw lat/lng text into a validated point.
///
/// Accepts surrounding whitespace and `,` as decimal separator. Latitude is
/// checked first, so a record broken on both axes reports the latitude error.
pub fn normalize(raw_lat: &str, raw_lng: &str) -> Result<NormalizedPoint, ParseError> {
    let lat = parse_component(Axis::Lat, raw_lat)?;
    let lng = parse_component(Axis::Lng, raw_lng)?;
    Ok(NormalizedPoint { lat, lng })
}

fn parse_component(axis: Axis, raw: &str) -> Result<f64, ParseError> {
    let text = raw.trim().replace(',', ".");
    let value: f64 = text.parse().map_err(|_| ParseError::NotANumber {
        axis,
        raw: raw.to_string(),
    })?;
    // "NaN" and "inf" parse as f64 but are not coordinates.
    if !value.is_finite() {
        return Err(ParseError::NotANumber {
            axis,
            raw: raw.to_string(),
        });
    }
    check_range(axis, value)
}

fn check_range(axis: Axis, value: f64) -> Result<f64, ParseError> {
    let limit = match axis {
        Axis::Lat => MAX_LAT_DEG,
        Axis::Lng => MAX_LNG_DEG,
    };
    if !value.is_finite() || value.abs() > limit {
        return Err(ParseError::OutOfRange { axis, value });
    }
    Ok(value)
}
