//! Compass-direction helpers.

pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Normalize any angle in degrees into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

/// 16-point compass label for a direction in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "";
    }
    let index = (normalize_degrees(degrees) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Rotation for a direction arrow. Directions are "coming from", arrows
/// point where the swell or wind is heading.
pub fn arrow_rotation(degrees: f64) -> f64 {
    normalize_degrees(degrees + 180.0)
}

/// Circular mean of a set of directions, `None` when empty or when the
/// directions cancel out.
pub fn mean_direction(degrees: &[f64]) -> Option<f64> {
    if degrees.is_empty() {
        return None;
    }
    let (sin, cos) = degrees.iter().fold((0.0, 0.0), |(s, c), d| {
        let r = d.to_radians();
        (s + r.sin(), c + r.cos())
    });
    if sin.abs() < 1e-9 && cos.abs() < 1e-9 {
        return None;
    }
    Some(normalize_degrees(sin.atan2(cos).to_degrees()))
}
