//! Dataset decoding.
//!
//! Two layouts are accepted:
//! - a JSON array of target records (`{id, lat, lng, status, points, hint?}`)
//! - a GeoJSON `FeatureCollection` of `Point` features, with the record fields
//!   carried in `properties` and coordinates in `geometry.coordinates` as
//!   `[lng, lat]`

use serde_json::Value;

use crate::target::{Target, TargetStatus, points_from_value, value_to_raw_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    Json(String),
    Layout(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Json(msg) => write!(f, "dataset is not valid JSON: {msg}"),
            DatasetError::Layout(msg) => write!(f, "unsupported dataset layout: {msg}"),
        }
    }
}

impl std::error::Error for DatasetError {}

pub fn parse_targets(text: &str) -> Result<Vec<Target>, DatasetError> {
    let value: Value = serde_json::from_str(text).map_err(|e| DatasetError::Json(e.to_string()))?;
    targets_from_value(value)
}

pub fn targets_from_value(value: Value) -> Result<Vec<Target>, DatasetError> {
    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| DatasetError::Layout(e.to_string()))
        }
        Value::Object(ref obj) if obj.get("type").and_then(Value::as_str) == Some("FeatureCollection") => {
            let Some(features) = obj.get("features").and_then(Value::as_array) else {
                return Err(DatasetError::Layout(
                    "FeatureCollection without a features array".to_string(),
                ));
            };
            Ok(features
                .iter()
                .enumerate()
                .filter_map(|(idx, f)| target_from_feature(idx, f))
                .collect())
        }
        other => Err(DatasetError::Layout(format!(
            "expected an array or a FeatureCollection, got {}",
            json_kind(&other)
        ))),
    }
}

fn target_from_feature(idx: usize, feature: &Value) -> Option<Target> {
    let props = feature.get("properties").cloned().unwrap_or(Value::Null);

    let id = ["id", "name"]
        .iter()
        .filter_map(|k| props.get(*k))
        .chain(feature.get("id"))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
    let Some(id) = id else {
        tracing::warn!(feature = idx, "skipping feature without id or name");
        return None;
    };

    // Non-point geometries keep empty coordinates and are reported later as
    // unparseable rather than silently dropped here.
    let (lat, lng) = match feature.get("geometry") {
        Some(g) if g.get("type").and_then(Value::as_str) == Some("Point") => {
            let coords = g.get("coordinates").and_then(Value::as_array);
            let lng = coords.and_then(|c| c.first()).map(value_to_raw_text);
            let lat = coords.and_then(|c| c.get(1)).map(value_to_raw_text);
            (lat.unwrap_or_default(), lng.unwrap_or_default())
        }
        _ => (String::new(), String::new()),
    };

    let status = props
        .get("status")
        .and_then(Value::as_str)
        .map(TargetStatus::from)
        .unwrap_or_default();
    let points = props.get("points").and_then(points_from_value).unwrap_or(0);
    let text = |key: &str| props.get(key).and_then(Value::as_str).map(str::to_string);

    Some(Target {
        id,
        lat,
        lng,
        status,
        points,
        hint: text("hint"),
        image: text("image"),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
