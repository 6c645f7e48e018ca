use foundation::bounds::GeoBounds;
use foundation::coords::{NormalizedPoint, ParseError};

use crate::dataset::Dataset;
use crate::target::Target;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisibleTarget<'a> {
    pub target: &'a Target,
    pub point: NormalizedPoint,
}

/// Per-pass accounting. Unparseable targets are never visible but are always
/// counted, whatever the viewport.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct VisibilityReport {
    pub visible: usize,
    pub outside: usize,
    pub not_a_number: usize,
    pub out_of_range: usize,
}

impl VisibilityReport {
    pub fn unparseable(&self) -> usize {
        self.not_a_number + self.out_of_range
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisiblePass<'a> {
    pub targets: Vec<VisibleTarget<'a>>,
    pub report: VisibilityReport,
}

/// Targets inside `viewport` (inclusive), in dataset order.
///
/// Single linear scan over the dataset.
pub fn filter_visible<'a>(dataset: &'a Dataset, viewport: &GeoBounds) -> VisiblePass<'a> {
    let mut pass = VisiblePass::default();
    for entry in dataset.entries() {
        match &entry.point {
            Ok(point) if viewport.contains(*point) => pass.targets.push(VisibleTarget {
                target: &entry.target,
                point: *point,
            }),
            Ok(_) => pass.report.outside += 1,
            Err(ParseError::NotANumber { .. }) => pass.report.not_a_number += 1,
            Err(ParseError::OutOfRange { .. }) => pass.report.out_of_range += 1,
        }
    }
    pass.report.visible = pass.targets.len();
    pass
}
