use crate::coords::NormalizedPoint;
use crate::math::Vec2;

/// Web Mercator tile edge in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Projects a point to global Web Mercator pixel space at `zoom`.
///
/// The origin is the north-west corner of the world; `y` grows southwards.
/// Latitudes beyond the Mercator limit are clamped to the world edge.
pub fn project_to_pixels(point: NormalizedPoint, zoom: f64) -> Vec2 {
    let scale = TILE_SIZE_PX * zoom.exp2();
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5 * scale;
    Vec2::new(x, y)
}
