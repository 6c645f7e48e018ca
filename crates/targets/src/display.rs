use foundation::coords::NormalizedPoint;
use serde::Serialize;

use crate::collected::CollectedSet;
use crate::target::{Target, TargetStatus};
use crate::visibility::VisibleTarget;

/// Resolved visual state of a target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCategory {
    Collected,
    Destroyed,
    Hidden,
    Default,
}

impl DisplayCategory {
    /// Category implied by the raw status alone.
    pub fn from_status(status: &TargetStatus) -> Self {
        match status {
            TargetStatus::Destroyed => DisplayCategory::Destroyed,
            TargetStatus::Hidden => DisplayCategory::Hidden,
            TargetStatus::Ok | TargetStatus::Unknown | TargetStatus::Unrecognized(_) => {
                DisplayCategory::Default
            }
        }
    }
}

/// `Collected` wins over any status whenever the id is in `collected`.
pub fn resolve(target: &Target, collected: &CollectedSet) -> DisplayCategory {
    if collected.contains(&target.id) {
        DisplayCategory::Collected
    } else {
        DisplayCategory::from_status(&target.status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedTarget<'a> {
    pub target: &'a Target,
    pub point: NormalizedPoint,
    pub category: DisplayCategory,
}

pub fn annotate<'a>(
    visible: &[VisibleTarget<'a>],
    collected: &CollectedSet,
) -> Vec<AnnotatedTarget<'a>> {
    visible
        .iter()
        .map(|v| AnnotatedTarget {
            target: v.target,
            point: v.point,
            category: resolve(v.target, collected),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DisplayCategory, resolve};
    use crate::collected::CollectedSet;
    use crate::target::{Target, TargetStatus};

    fn t(id: &str, status: TargetStatus) -> Target {
        Target::new(id, "0", "0", status)
    }

    #[test]
    fn collected_takes_precedence_over_every_status() {
        let collected = CollectedSet::from_ids(["A"]);
        for status in [
            TargetStatus::Ok,
            TargetStatus::Destroyed,
            TargetStatus::Hidden,
            TargetStatus::Unknown,
            TargetStatus::Unrecognized("x".into()),
        ] {
            assert_eq!(resolve(&t("A", status), &collected), DisplayCategory::Collected);
        }
    }

    #[test]
    fn falls_back_to_status() {
        let empty = CollectedSet::new();
        assert_eq!(resolve(&t("A", TargetStatus::Destroyed), &empty), DisplayCategory::Destroyed);
        assert_eq!(resolve(&t("A", TargetStatus::Hidden), &empty), DisplayCategory::Hidden);
        assert_eq!(resolve(&t("A", TargetStatus::Ok), &empty), DisplayCategory::Default);
        assert_eq!(resolve(&t("A", TargetStatus::Unknown), &empty), DisplayCategory::Default);
    }

    #[test]
    fn unrecognized_status_matches_ok() {
        let others = CollectedSet::from_ids(["B"]);
        let ok = resolve(&t("A", TargetStatus::Ok), &others);
        let odd = resolve(&t("A", TargetStatus::Unrecognized("repaired?".into())), &others);
        assert_eq!(ok, odd);
    }
}
