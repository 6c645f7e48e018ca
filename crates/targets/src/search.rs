use foundation::bounds::Recenter;
use foundation::coords::ParseError;

use crate::dataset::Dataset;
use crate::target::Target;

/// Zoom used when focusing a search result.
pub const DEFAULT_FOCUS_ZOOM: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub enum FocusError {
    UnknownTarget(String),
    Unparseable { id: String, error: ParseError },
}

impl std::fmt::Display for FocusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusError::UnknownTarget(id) => write!(f, "no target named {id}"),
            FocusError::Unparseable { id, error } => {
                write!(f, "cannot show {id} on the map: {error}")
            }
        }
    }
}

impl std::error::Error for FocusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FocusError::UnknownTarget(_) => None,
            FocusError::Unparseable { error, .. } => Some(error),
        }
    }
}

/// Case-insensitive substring lookup over target ids.
///
/// Keys are lowered once, aligned with `Dataset::entries()`; an index is only
/// meaningful for the dataset it was built from.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    keys: Vec<String>,
}

impl SearchIndex {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            keys: dataset.targets().map(|t| t.id.to_lowercase()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Matching targets in dataset order. An empty query matches everything.
    pub fn query<'a>(&self, dataset: &'a Dataset, query: &str) -> Vec<&'a Target> {
        let needle = query.to_lowercase();
        self.keys
            .iter()
            .zip(dataset.entries())
            .filter(|(key, _)| key.contains(needle.as_str()))
            .map(|(_, entry)| &entry.target)
            .collect()
    }
}

/// Recenter command for a search result.
pub fn focus(dataset: &Dataset, id: &str, zoom: f64) -> Result<Recenter, FocusError> {
    let entry = dataset
        .get(id)
        .ok_or_else(|| FocusError::UnknownTarget(id.to_string()))?;
    match &entry.point {
        Ok(point) => Ok(Recenter::new(*point, zoom)),
        Err(error) => Err(FocusError::Unparseable {
            id: id.to_string(),
            error: error.clone(),
        }),
    }
}
