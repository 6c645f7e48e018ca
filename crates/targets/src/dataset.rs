use std::collections::HashMap;

use foundation::coords::{NormalizedPoint, ParseError, normalize};

use crate::target::Target;

/// A target together with its normalization outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub target: Target,
    pub point: Result<NormalizedPoint, ParseError>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub duplicates: usize,
    pub not_a_number: usize,
    pub out_of_range: usize,
}

impl LoadReport {
    pub fn unparseable(&self) -> usize {
        self.not_a_number + self.out_of_range
    }
}

/// The static target set for a session.
///
/// Coordinates are normalized exactly once here, so every visibility pass is a
/// single linear scan. Order is the publisher's order; ids are unique (first
/// occurrence wins).
#[derive(Debug, Default)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
    by_id: HashMap<String, usize>,
    report: LoadReport,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        let mut out = Self::default();
        for target in targets {
            if out.by_id.contains_key(&target.id) {
                tracing::warn!(id = %target.id, "dropping duplicate target id");
                out.report.duplicates += 1;
                continue;
            }
            let point = normalize(&target.lat, &target.lng);
            if let Err(err) = &point {
                tracing::debug!(id = %target.id, "unparseable coordinates: {err}");
                match err {
                    ParseError::NotANumber { .. } => out.report.not_a_number += 1,
                    ParseError::OutOfRange { .. } => out.report.out_of_range += 1,
                }
            }
            out.by_id.insert(target.id.clone(), out.entries.len());
            out.entries.push(DatasetEntry { target, point });
        }
        out.report.loaded = out.entries.len();
        tracing::info!(
            loaded = out.report.loaded,
            duplicates = out.report.duplicates,
            unparseable = out.report.unparseable(),
            "dataset built"
        );
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DatasetEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> + '_ {
        self.entries.iter().map(|e| &e.target)
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, LoadReport};
    use crate::target::{Target, TargetStatus};
    use foundation::coords::ParseError;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_once_and_reports() {
        let ds = Dataset::from_targets(vec![
            Target::new("A", "48,85", "2,35", TargetStatus::Ok),
            Target::new("B", "", "2.0", TargetStatus::Ok),
            Target::new("C", "95", "2.0", TargetStatus::Hidden),
            Target::new("A", "1", "1", TargetStatus::Destroyed),
        ]);

        assert_eq!(
            ds.report(),
            LoadReport {
                loaded: 3,
                duplicates: 1,
                not_a_number: 1,
                out_of_range: 1,
            }
        );
        assert_eq!(ds.report().unparseable(), 2);

        let a = ds.get("A").unwrap();
        assert_eq!(a.target.status, TargetStatus::Ok);
        assert_eq!(a.point.as_ref().unwrap().lat, 48.85);
        assert!(matches!(
            ds.get("C").unwrap().point,
            Err(ParseError::OutOfRange { .. })
        ));
        assert!(ds.get("missing").is_none());
    }

    #[test]
    fn preserves_publisher_order() {
        let ds = Dataset::from_targets(vec![
            Target::new("z", "0", "0", TargetStatus::Ok),
            Target::new("a", "0", "0", TargetStatus::Ok),
        ]);
        let ids: Vec<&str> = ds.targets().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }
}
