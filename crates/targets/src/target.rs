use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw target status as published by the dataset.
///
/// Unknown spellings are preserved instead of rejected so a single odd record
/// never fails a whole load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TargetStatus {
    Ok,
    Destroyed,
    Hidden,
    #[default]
    Unknown,
    Unrecognized(String),
}

impl TargetStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TargetStatus::Ok => "OK",
            TargetStatus::Destroyed => "destroyed",
            TargetStatus::Hidden => "hidden",
            TargetStatus::Unknown => "unknown",
            TargetStatus::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for TargetStatus {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "ok" => TargetStatus::Ok,
            "destroyed" => TargetStatus::Destroyed,
            "hidden" => TargetStatus::Hidden,
            "unknown" | "" => TargetStatus::Unknown,
            _ => TargetStatus::Unrecognized(trimmed.to_string()),
        }
    }
}

impl From<Option<String>> for TargetStatus {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(s) => TargetStatus::from(s.as_str()),
            None => TargetStatus::Unknown,
        }
    }
}

impl From<TargetStatus> for String {
    fn from(status: TargetStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest as loaded from the dataset.
///
/// `lat`/`lng` keep the publisher's text verbatim; use
/// [`foundation::coords::normalize`] (or a [`crate::Dataset`]) to obtain
/// validated coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub lat: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub lng: String,
    #[serde(default)]
    pub status: TargetStatus,
    #[serde(default, deserialize_with = "points_value")]
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Target {
    pub fn new(
        id: impl Into<String>,
        lat: impl Into<String>,
        lng: impl Into<String>,
        status: TargetStatus,
    ) -> Self {
        Self {
            id: id.into(),
            lat: lat.into(),
            lng: lng.into(),
            status,
            points: 0,
            hint: None,
            image: None,
        }
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Coordinates arrive as strings, numbers, or null depending on the source.
pub(crate) fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_raw_text(&Value::deserialize(deserializer)?))
}

pub(crate) fn value_to_raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        // Kept verbatim so normalization reports it instead of guessing.
        other => other.to_string(),
    }
}

fn points_value<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    points_from_value(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("points must be an integer, got {value}"))
    })
}

pub(crate) fn points_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) if s.trim().is_empty() => Some(0),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole-valued floats within `i64` range, e.g. `12.0`; `12.7` is rejected.
fn integral_f64(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::{Target, TargetStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn status_parsing_is_case_insensitive_and_total() {
        assert_eq!(TargetStatus::from("OK"), TargetStatus::Ok);
        assert_eq!(TargetStatus::from("ok"), TargetStatus::Ok);
        assert_eq!(TargetStatus::from(" Destroyed "), TargetStatus::Destroyed);
        assert_eq!(TargetStatus::from("HIDDEN"), TargetStatus::Hidden);
        assert_eq!(TargetStatus::from(""), TargetStatus::Unknown);
        assert_eq!(
            TargetStatus::from("damaged"),
            TargetStatus::Unrecognized("damaged".to_string())
        );
    }

    #[test]
    fn deserializes_mixed_coordinate_encodings() {
        let raw = r#"[
            {"id": "PA_01", "lat": "48,8566", "lng": 2.3522, "status": "OK", "points": 30},
            {"id": "PA_02", "lat": null, "status": "destroyed", "points": "20", "hint": "near the bridge"},
            {"id": "PA_03", "lat": "48.1", "lng": "2.1"}
        ]"#;
        let targets: Vec<Target> = serde_json::from_str(raw).unwrap();

        assert_eq!(targets[0].lat, "48,8566");
        assert_eq!(targets[0].lng, "2.3522");
        assert_eq!(targets[0].points, 30);
        assert_eq!(targets[1].lat, "");
        assert_eq!(targets[1].lng, "");
        assert_eq!(targets[1].status, TargetStatus::Destroyed);
        assert_eq!(targets[1].points, 20);
        assert_eq!(targets[1].hint.as_deref(), Some("near the bridge"));
        assert_eq!(targets[2].status, TargetStatus::Unknown);
        assert_eq!(targets[2].points, 0);
    }

    #[test]
    fn rejects_non_integer_points() {
        let raw = r#"{"id": "X", "lat": "1", "lng": "1", "points": "lots"}"#;
        assert!(serde_json::from_str::<Target>(raw).is_err());

        let raw = r#"{"id": "X", "lat": "1", "lng": "1", "points": 12.7}"#;
        let err = serde_json::from_str::<Target>(raw).unwrap_err();
        assert!(err.to_string().contains("points must be an integer"), "{err}");

        let raw = r#"{"id": "X", "lat": "1", "lng": "1", "points": 1e300}"#;
        assert!(serde_json::from_str::<Target>(raw).is_err());
    }

    #[test]
    fn whole_float_points_are_accepted() {
        let raw = r#"[
            {"id": "A", "lat": "1", "lng": "1", "points": 12.0},
            {"id": "B", "lat": "1", "lng": "1", "points": -3}
        ]"#;
        let targets: Vec<Target> = serde_json::from_str(raw).unwrap();
        assert_eq!(targets[0].points, 12);
        assert_eq!(targets[1].points, -3);
    }

    #[test]
    fn status_serializes_as_publisher_text() {
        let t = Target::new("A", "1", "2", TargetStatus::Unrecognized("weird".into()));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["status"], "weird");
        assert!(json.get("hint").is_none());
    }
}
