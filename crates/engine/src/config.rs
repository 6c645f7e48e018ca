use std::env;

use gallery::http::GalleryEndpoints;
use layers::cluster::{ClusterConfig, MIN_RADIUS_PX};
use serde::{Deserialize, Serialize};
use targets::search::DEFAULT_FOCUS_ZOOM;

use crate::tracker::TrackerConfig;

pub const DEFAULT_GALLERY_BASE: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub endpoints: GalleryEndpoints,
    /// Zoom used when a search result is focused.
    pub focus_zoom: f64,
    pub cluster: ClusterConfig,
    pub tracker: TrackerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoints: endpoints_for_base(DEFAULT_GALLERY_BASE),
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            cluster: ClusterConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads `FLASHMAP_*` variables, falling back to defaults for anything
    /// missing or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base = lookup("FLASHMAP_GALLERY_BASE").unwrap_or_else(|| DEFAULT_GALLERY_BASE.to_string());
        let base_endpoints = endpoints_for_base(&base);
        let endpoints = GalleryEndpoints {
            dataset_url: lookup("FLASHMAP_DATASET_URL").unwrap_or(base_endpoints.dataset_url),
            roster_url: lookup("FLASHMAP_ROSTER_URL").unwrap_or(base_endpoints.roster_url),
            completion_url_template: lookup("FLASHMAP_COMPLETION_URL")
                .unwrap_or(base_endpoints.completion_url_template),
        };

        let cluster = ClusterConfig {
            radius_px: Some(env_var_f64(&lookup, "FLASHMAP_CLUSTER_RADIUS_PX", defaults.cluster.radius_px))
                .filter(|r| *r >= MIN_RADIUS_PX)
                .unwrap_or(defaults.cluster.radius_px),
            disable_at_zoom: match lookup("FLASHMAP_CLUSTER_DISABLE_AT_ZOOM").as_deref() {
                Some("off" | "none") => None,
                Some(raw) => raw.parse().ok().or(defaults.cluster.disable_at_zoom),
                None => defaults.cluster.disable_at_zoom,
            },
            small_badge_max: env_var_usize(
                &lookup,
                "FLASHMAP_SMALL_BADGE_MAX",
                defaults.cluster.small_badge_max,
            ),
        };

        let d = defaults.tracker;
        let mut tracker = TrackerConfig {
            tracking_zoom: env_var_f64(&lookup, "FLASHMAP_TRACKING_ZOOM", d.tracking_zoom),
            heading_smoothing: env_var_f64(&lookup, "FLASHMAP_HEADING_SMOOTHING", d.heading_smoothing)
                .clamp(0.0, 0.99),
            pulse: d.pulse,
        };
        tracker.pulse.base_radius_m = env_var_f64(&lookup, "FLASHMAP_PULSE_BASE_M", d.pulse.base_radius_m);
        tracker.pulse.step_m = env_var_f64(&lookup, "FLASHMAP_PULSE_STEP_M", d.pulse.step_m);
        tracker.pulse.step_s =
            env_var_u32(&lookup, "FLASHMAP_PULSE_TICK_MS", (d.pulse.step_s * 1000.0).round() as u32) as f64 / 1000.0;
        tracker.pulse.duration_s =
            env_var_u32(&lookup, "FLASHMAP_PULSE_DURATION_MS", (d.pulse.duration_s * 1000.0).round() as u32) as f64
                / 1000.0;

        Self {
            endpoints,
            focus_zoom: env_var_f64(&lookup, "FLASHMAP_FOCUS_ZOOM", defaults.focus_zoom),
            cluster,
            tracker,
        }
    }
}

/// Conventional gallery layout under one base URL.
pub fn endpoints_for_base(base: &str) -> GalleryEndpoints {
    let base = base.trim_end_matches('/');
    GalleryEndpoints {
        dataset_url: format!("{base}/data/mosaics.json"),
        roster_url: format!("{base}/data/players.json"),
        completion_url_template: format!("{base}/api/players/{{uid}}/completion"),
    }
}

fn env_var_u32(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_var_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_var_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    lookup(key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}
