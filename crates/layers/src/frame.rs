use foundation::coords::NormalizedPoint;
use serde::Serialize;
use targets::display::{AnnotatedTarget, DisplayCategory};
use targets::target::Target;
use targets::visibility::VisibilityReport;

use crate::cluster::{Cluster, ClusterConfig, aggregate, group_by_proximity};
use crate::symbology::{Color, category_color};

/// Popup content for a single target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub status: String,
    pub points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Popup {
    pub fn for_target(target: &Target) -> Self {
        Self {
            title: target.id.clone(),
            status: target.status.to_string(),
            points: target.points,
            hint: target.hint.clone(),
            image: target.image.clone(),
        }
    }
}

/// Read-only projection of one target. `(category, id)` is the key the
/// surface uses to pick or build the icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetMarker {
    pub id: String,
    pub position: NormalizedPoint,
    pub category: DisplayCategory,
    pub color: Color,
    pub popup: Popup,
}

impl TargetMarker {
    pub fn from_annotated(t: &AnnotatedTarget<'_>) -> Self {
        Self {
            id: t.target.id.clone(),
            position: t.point,
            category: t.category,
            color: category_color(t.category),
            popup: Popup::for_target(t.target),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub visible: usize,
    pub unparseable: usize,
    pub markers: usize,
    pub clusters: usize,
}

/// Replace-all instruction for the rendering surface.
///
/// A frame is complete: anything the surface drew for a previous frame must
/// be discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderFrame {
    pub zoom: f64,
    pub markers: Vec<TargetMarker>,
    pub clusters: Vec<Cluster>,
    pub stats: FrameStats,
}

impl RenderFrame {
    pub fn marker(&self, id: &str) -> Option<&TargetMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn cluster_containing(&self, id: &str) -> Option<&Cluster> {
        self.clusters
            .iter()
            .find(|c| c.members.iter().any(|m| m == id))
    }
}

/// Groups annotated targets and projects the result into a frame.
pub fn build_frame(
    annotated: &[AnnotatedTarget<'_>],
    zoom: f64,
    config: &ClusterConfig,
    report: VisibilityReport,
) -> RenderFrame {
    let aggregation = aggregate(group_by_proximity(annotated, zoom, config), config);
    let markers: Vec<TargetMarker> = aggregation
        .singles
        .iter()
        .map(TargetMarker::from_annotated)
        .collect();

    RenderFrame {
        zoom,
        stats: FrameStats {
            visible: report.visible,
            unparseable: report.unparseable(),
            markers: markers.len(),
            clusters: aggregation.clusters.len(),
        },
        markers,
        clusters: aggregation.clusters,
    }
}
