/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Compass heading to draw for a device-orientation reading.
///
/// `displayHeading = normalize(-raw_alpha - screen_rotation + 180)`
///
/// `raw_alpha` is the device orientation `alpha` (counter-clockwise degrees
/// around the z axis) and `screen_rotation` the current screen orientation
/// angle, both in degrees.
pub fn display_heading(raw_alpha: f64, screen_rotation: f64) -> f64 {
    normalize_degrees(-raw_alpha - screen_rotation + 180.0)
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let d = normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Exponential low-pass on a circular quantity.
///
/// `smoothing` is clamped to `[0, 1)`; `0` returns `target` unchanged.
pub fn smooth_heading(previous: f64, target: f64, smoothing: f64) -> f64 {
    let s = smoothing.clamp(0.0, 0.999);
    normalize_degrees(previous + (1.0 - s) * shortest_delta(previous, target))
}
