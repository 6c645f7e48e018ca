use serde::{Deserialize, Serialize};

use crate::coords::NormalizedPoint;
use crate::math::angle::normalize_degrees;

/// Geographic bounding rectangle in degrees.
///
/// Containment is inclusive on every edge. When `west > east` the rectangle
/// spans the antimeridian and covers longitudes `>= west` or `<= east`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Bounds covering the whole globe.
    pub fn world() -> Self {
        Self::new(-90.0, -180.0, 90.0, 180.0)
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    pub fn contains(&self, point: NormalizedPoint) -> bool {
        if point.lat < self.south || point.lat > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            point.lng >= self.west || point.lng <= self.east
        } else {
            point.lng >= self.west && point.lng <= self.east
        }
    }

    /// Rectangle of the given half-extents around `center`.
    ///
    /// Latitudes are clamped to the poles. Longitudes wrap into `[-180, 180]`,
    /// so a window straddling the antimeridian comes back with `west > east`;
    /// a half-width of 180 or more covers every longitude.
    pub fn around(center: NormalizedPoint, half_lat: f64, half_lng: f64) -> Self {
        let south = (center.lat - half_lat).max(-90.0);
        let north = (center.lat + half_lat).min(90.0);
        if half_lng >= 180.0 {
            return Self::new(south, -180.0, north, 180.0);
        }
        let west = wrap_longitude(center.lng - half_lng);
        let east = match wrap_longitude(center.lng + half_lng) {
            e if e == -180.0 => 180.0,
            e => e,
        };
        Self::new(south, west, north, east)
    }

    pub fn center(&self) -> NormalizedPoint {
        let lat = (self.south + self.north) * 0.5;
        let lng = if self.crosses_antimeridian() {
            let mid = (self.west + self.east + 360.0) * 0.5;
            if mid > 180.0 { mid - 360.0 } else { mid }
        } else {
            (self.west + self.east) * 0.5
        };
        NormalizedPoint { lat, lng }
    }
}

/// Wraps a longitude into `[-180, 180)`.
pub fn wrap_longitude(lng: f64) -> f64 {
    normalize_degrees(lng + 180.0) - 180.0
}

/// What the rendering surface currently shows.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: GeoBounds,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(bounds: GeoBounds, zoom: f64) -> Self {
        Self { bounds, zoom }
    }
}

/// Command asking the rendering surface to move its viewport.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recenter {
    pub center: NormalizedPoint,
    pub zoom: f64,
}

impl Recenter {
    pub fn new(center: NormalizedPoint, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, wrap_longitude};
    use crate::coords::NormalizedPoint;

    fn p(lat: f64, lng: f64) -> NormalizedPoint {
        NormalizedPoint { lat, lng }
    }

    #[test]
    fn contains_is_inclusive_on_edges() {
        let b = GeoBounds::new(48.0, 2.0, 49.0, 3.0);
        assert!(b.contains(p(48.0, 2.0)));
        assert!(b.contains(p(49.0, 3.0)));
        assert!(b.contains(p(48.5, 2.5)));
        assert!(!b.contains(p(47.999, 2.5)));
        assert!(!b.contains(p(48.5, 3.001)));
    }

    #[test]
    fn antimeridian_bounds_wrap() {
        let b = GeoBounds::new(-10.0, 170.0, 10.0, -170.0);
        assert!(b.crosses_antimeridian());
        assert!(b.contains(p(0.0, 175.0)));
        assert!(b.contains(p(0.0, -175.0)));
        assert!(!b.contains(p(0.0, 0.0)));
        let c = b.center();
        assert!((c.lng.abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn window_around_antimeridian_wraps() {
        let b = GeoBounds::around(p(0.0, 179.9), 1.0, 0.2);
        assert!(b.crosses_antimeridian());
        assert!((b.west - 179.7).abs() < 1e-9);
        assert!((b.east + 179.9).abs() < 1e-9);
        assert!(b.contains(p(0.0, -179.95)));
        assert!(b.contains(p(0.0, 179.8)));
        assert!(!b.contains(p(0.0, 0.0)));

        let b = GeoBounds::around(p(0.0, -179.9), 1.0, 0.2);
        assert!(b.crosses_antimeridian());
        assert!(b.contains(p(0.0, 179.95)));
    }

    #[test]
    fn window_edges_stay_in_range() {
        let b = GeoBounds::around(p(89.5, 170.0), 1.0, 10.0);
        assert_eq!(b.north, 90.0);
        assert_eq!(b.east, 180.0);
        assert!(!b.crosses_antimeridian());

        assert_eq!(GeoBounds::around(p(0.0, 10.0), 100.0, 200.0), GeoBounds::world());
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
    }
}
