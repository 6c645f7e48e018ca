use std::collections::HashMap;

use foundation::coords::NormalizedPoint;
use foundation::math::{Vec2, project_to_pixels};
use serde::{Deserialize, Serialize};
use targets::display::AnnotatedTarget;

use crate::symbology::{BadgeTier, Color, DEFAULT_SMALL_BADGE_MAX};

/// Smallest grouping radius honoured; smaller configured values are raised to it.
pub const MIN_RADIUS_PX: f64 = 1.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum screen distance between a cluster seed and a member.
    pub radius_px: f64,
    /// At or above this zoom every target is drawn on its own.
    pub disable_at_zoom: Option<f64>,
    /// Largest member count still drawn with the small badge.
    pub small_badge_max: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius_px: 80.0,
            disable_at_zoom: Some(19.0),
            small_badge_max: DEFAULT_SMALL_BADGE_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tier: BadgeTier,
    pub color: Color,
}

impl Badge {
    pub fn for_count(count: usize, small_max: usize) -> Self {
        let tier = BadgeTier::for_count(count, small_max);
        Self {
            label: count.to_string(),
            tier,
            color: tier.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub centroid: NormalizedPoint,
    /// Ascending target ids.
    pub members: Vec<String>,
    pub badge: Badge,
}

/// Result of aggregating a partition: multi-member groups become clusters,
/// single-member groups stay plain markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation<'a> {
    pub clusters: Vec<Cluster>,
    pub singles: Vec<AnnotatedTarget<'a>>,
}

/// Greedy grid-bucket grouping in screen space.
///
/// Targets are visited in ascending id order. Each joins the nearest existing
/// seed within `radius_px` (ties to the older cluster), or seeds a new group.
/// Seeds are bucketed in `radius_px` cells so only the 3x3 neighbourhood is
/// inspected per target. Radii below [`MIN_RADIUS_PX`] are raised to it.
///
/// Ordering contract:
/// - groups are ordered by their first member id
/// - members within a group are in ascending id order
pub fn group_by_proximity<'a>(
    targets: &[AnnotatedTarget<'a>],
    zoom: f64,
    config: &ClusterConfig,
) -> Vec<Vec<AnnotatedTarget<'a>>> {
    let mut ordered: Vec<&AnnotatedTarget<'a>> = targets.iter().collect();
    ordered.sort_by(|a, b| a.target.id.cmp(&b.target.id));

    let disabled = config.disable_at_zoom.is_some_and(|z| zoom >= z);
    if disabled || !(config.radius_px > 0.0) {
        return ordered.into_iter().map(|t| vec![t.clone()]).collect();
    }

    let radius = config.radius_px.max(MIN_RADIUS_PX);
    let radius_sq = radius * radius;
    let mut groups: Vec<Vec<AnnotatedTarget<'a>>> = Vec::new();
    let mut seeds: Vec<Vec2> = Vec::new();
    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();

    for target in ordered {
        let px = project_to_pixels(target.point, zoom);
        let (cx, cy) = cell_of(px, radius);

        let mut best: Option<(f64, usize)> = None;
        for ny in cy.saturating_sub(1)..=cy.saturating_add(1) {
            for nx in cx.saturating_sub(1)..=cx.saturating_add(1) {
                let Some(candidates) = cells.get(&(nx, ny)) else {
                    continue;
                };
                for &idx in candidates {
                    let d2 = seeds[idx].distance_sq(px);
                    if d2 > radius_sq {
                        continue;
                    }
                    let closer = match best {
                        None => true,
                        Some((bd2, bidx)) => d2 < bd2 || (d2 == bd2 && idx < bidx),
                    };
                    if closer {
                        best = Some((d2, idx));
                    }
                }
            }
        }

        match best {
            Some((_, idx)) => groups[idx].push(target.clone()),
            None => {
                let idx = groups.len();
                groups.push(vec![target.clone()]);
                seeds.push(px);
                cells.entry((cx, cy)).or_default().push(idx);
            }
        }
    }

    groups
}

/// Turns a final partition into badges and plain markers.
///
/// Independent of how the partition was produced: members are re-sorted by id
/// and clusters ordered by first member id, so equal inputs always yield equal
/// output.
pub fn aggregate<'a>(partition: Vec<Vec<AnnotatedTarget<'a>>>, config: &ClusterConfig) -> Aggregation<'a> {
    let mut out = Aggregation::default();
    for mut group in partition {
        group.sort_by(|a, b| a.target.id.cmp(&b.target.id));
        match group.len() {
            0 => continue,
            1 => out.singles.extend(group),
            n => {
                let (lat_sum, lng_sum) = group
                    .iter()
                    .fold((0.0, 0.0), |(la, ln), t| (la + t.point.lat, ln + t.point.lng));
                out.clusters.push(Cluster {
                    centroid: NormalizedPoint {
                        lat: lat_sum / n as f64,
                        lng: lng_sum / n as f64,
                    },
                    members: group.iter().map(|t| t.target.id.clone()).collect(),
                    badge: Badge::for_count(n, config.small_badge_max),
                });
            }
        }
    }
    out.clusters.sort_by(|a, b| a.members[0].cmp(&b.members[0]));
    out.singles.sort_by(|a, b| a.target.id.cmp(&b.target.id));
    out
}

fn cell_of(px: Vec2, cell: f64) -> (i64, i64) {
    ((px.x / cell).floor() as i64, (px.y / cell).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::{ClusterConfig, aggregate, group_by_proximity};
    use crate::frame::build_frame;
    use crate::symbology::BadgeTier;
    use foundation::coords::NormalizedPoint;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, Instant};
    use targets::visibility::VisibilityReport;
    use targets::display::{AnnotatedTarget, DisplayCategory};
    use targets::target::{Target, TargetStatus};

    fn make_targets(layout: &[(&str, f64, f64)]) -> Vec<Target> {
        layout.iter()
            .map(|(id, lat, lng)| Target::new(*id, lat.to_string(), lng.to_string(), TargetStatus::Ok))
            .collect()
    }

    fn annotate(ts: &[Target]) -> Vec<AnnotatedTarget<'_>> {
        ts.iter()
            .map(|t| AnnotatedTarget {
                target: t,
                point: NormalizedPoint {
                    lat: t.lat.parse().unwrap(),
                    lng: t.lng.parse().unwrap(),
                },
                category: DisplayCategory::Default,
            })
            .collect()
    }

    fn member_ids(groups: &[Vec<AnnotatedTarget<'_>>]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| g.iter().map(|t| t.target.id.clone()).collect())
            .collect()
    }

    #[test]
    fn nearby_targets_merge_and_far_ones_do_not() {
        let ts = make_targets(&[
            ("C", 48.8566, 2.3522),
            ("A", 48.8567, 2.3523),
            ("B", 48.8568, 2.3521),
            ("Z", 43.2965, 5.3698),
        ]);
        let ann = annotate(&ts);
        let groups = group_by_proximity(&ann, 12.0, &ClusterConfig::default());
        assert_eq!(
            member_ids(&groups),
            vec![vec!["A", "B", "C"], vec!["Z"]]
                .into_iter()
                .map(|g| g.into_iter().map(String::from).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn grouping_is_independent_of_input_order() {
        let ts = make_targets(&[
            ("T3", 48.850, 2.350),
            ("T1", 48.851, 2.351),
            ("T4", 48.900, 2.400),
            ("T2", 48.901, 2.401),
            ("T5", 48.875, 2.375),
        ]);
        let ann = annotate(&ts);
        let mut reversed = ann.clone();
        reversed.reverse();

        let cfg = ClusterConfig::default();
        let a = group_by_proximity(&ann, 13.0, &cfg);
        let b = group_by_proximity(&reversed, 13.0, &cfg);
        assert_eq!(member_ids(&a), member_ids(&b));

        let agg_a = aggregate(a, &cfg);
        let agg_b = aggregate(b, &cfg);
        assert_eq!(agg_a.clusters, agg_b.clusters);
    }

    #[test]
    fn disabled_at_high_zoom() {
        let ts = make_targets(&[("A", 48.8566, 2.3522), ("B", 48.8566, 2.3522)]);
        let ann = annotate(&ts);
        let groups = group_by_proximity(&ann, 19.0, &ClusterConfig::default());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn badge_tiers_follow_member_count() {
        let layout: Vec<(String, f64, f64)> = (0..11)
            .map(|i| (format!("L{i:02}"), 48.8566 + i as f64 * 1e-5, 2.3522))
            .collect();
        let mut ts: Vec<Target> = layout
            .iter()
            .map(|(id, lat, lng)| Target::new(id.as_str(), lat.to_string(), lng.to_string(), TargetStatus::Ok))
            .collect();
        ts.extend(make_targets(&[("S1", 40.0, 3.0), ("S2", 40.00001, 3.0)]));
        let ann = annotate(&ts);

        let cfg = ClusterConfig::default();
        let agg = aggregate(group_by_proximity(&ann, 10.0, &cfg), &cfg);
        assert_eq!(agg.clusters.len(), 2);
        assert!(agg.singles.is_empty());

        let large = &agg.clusters[0];
        assert_eq!(large.members.len(), 11);
        assert_eq!(large.badge.label, "11");
        assert_eq!(large.badge.tier, BadgeTier::Large);

        let small = &agg.clusters[1];
        assert_eq!(small.members, vec!["S1".to_string(), "S2".to_string()]);
        assert_eq!(small.badge.tier, BadgeTier::Small);
        assert!((small.centroid.lat - 40.000005).abs() < 1e-9);
    }

    #[test]
    fn aggregate_keeps_singletons_as_markers() {
        let ts = make_targets(&[("B", 1.0, 1.0), ("A", 2.0, 2.0)]);
        let ann = annotate(&ts);
        let agg = aggregate(vec![vec![ann[0].clone()], vec![ann[1].clone()], vec![]], &ClusterConfig::default());
        assert!(agg.clusters.is_empty());
        let ids: Vec<&str> = agg.singles.iter().map(|t| t.target.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn neighbours_across_a_cell_edge_merge() {
        // At zoom 0 the 80 px cell edge x = 160 sits at lng 45.
        let ts = make_targets(&[("A", 0.0, 44.99), ("B", 0.0, 45.01)]);
        let ann = annotate(&ts);
        let groups = group_by_proximity(&ann, 0.0, &ClusterConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn tiny_radius_is_raised_to_the_floor() {
        let ts = make_targets(&[("A", 48.0, 2.0), ("B", 48.0, 2.0), ("C", 10.0, 10.0)]);
        let ann = annotate(&ts);
        let cfg = ClusterConfig {
            radius_px: 1e-15,
            ..ClusterConfig::default()
        };
        let groups = group_by_proximity(&ann, 13.0, &cfg);
        assert_eq!(
            member_ids(&groups),
            vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string()]]
        );
    }

    #[test]
    fn extreme_zoom_without_cutoff_does_not_overflow_cells() {
        let ts = make_targets(&[("A", 48.0, 2.0), ("B", 48.0, 2.0), ("C", -48.0, -2.0)]);
        let ann = annotate(&ts);
        let cfg = ClusterConfig {
            disable_at_zoom: None,
            ..ClusterConfig::default()
        };
        for zoom in [40.0, 70.0] {
            let groups = group_by_proximity(&ann, zoom, &cfg);
            assert_eq!(
                member_ids(&groups),
                vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string()]]
            );
        }
    }

    #[test]
    fn dense_thousands_are_fully_partitioned() {
        let ts: Vec<Target> = (0..5_000)
            .map(|i| {
                let lat = 48.80 + (i % 100) as f64 * 0.0005;
                let lng = 2.30 + (i / 100) as f64 * 0.0005;
                Target::new(format!("T{i:05}"), lat.to_string(), lng.to_string(), TargetStatus::Ok)
            })
            .collect();
        let ann = annotate(&ts);
        let report = VisibilityReport {
            visible: ann.len(),
            ..VisibilityReport::default()
        };
        let frame = build_frame(&ann, 14.0, &ClusterConfig::default(), report);

        let clustered: usize = frame.clusters.iter().map(|c| c.members.len()).sum();
        assert_eq!(clustered + frame.markers.len(), 5_000);
        assert!(!frame.clusters.is_empty() && frame.clusters.len() < 200);
        assert_eq!(frame.stats.visible, 5_000);
    }

    #[test]
    fn sparse_grid_cost_stays_linear() {
        // 20,000 targets ~100 px apart: every one is a singleton, so a
        // seed-by-seed scan would do 2e8 distance checks.
        let ts: Vec<Target> = (0..20_000)
            .map(|i| {
                let lat = 40.0 + (i % 200) as f64 * 0.01;
                let lng = (i / 200) as f64 * 0.01;
                Target::new(format!("S{i:05}"), lat.to_string(), lng.to_string(), TargetStatus::Ok)
            })
            .collect();
        let ann = annotate(&ts);

        let started = Instant::now();
        let groups = group_by_proximity(&ann, 14.0, &ClusterConfig::default());
        let elapsed = started.elapsed();

        assert_eq!(groups.len(), 20_000);
        assert!(elapsed < Duration::from_secs(2), "grouping took {elapsed:?}");
    }
}
