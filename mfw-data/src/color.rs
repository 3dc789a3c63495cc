//! Color scales used by the wind and swell charts.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Linear blend; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Calm, moderate and strong wind, in knots.
pub const WIND_COLOR_STOPS: [(f64, Rgb); 3] = [
    (0.0, Rgb(0x4F, 0xC3, 0xF7)),
    (17.5, Rgb(0xFF, 0xD5, 0x4F)),
    (35.0, Rgb(0xE5, 0x39, 0x35)),
];

/// Interpolate a piecewise-linear color scale. Values outside the first and
/// last stop take the end colors. `stops` must be sorted by value.
pub fn interpolate(stops: &[(f64, Rgb)], value: f64) -> Rgb {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Rgb(0, 0, 0),
    };
    if value.is_nan() || value <= first.0 {
        return first.1;
    }
    if value >= last.0 {
        return last.1;
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        if value <= hi.0 {
            let span = hi.0 - lo.0;
            let t = if span > 0.0 { (value - lo.0) / span } else { 1.0 };
            return lo.1.lerp(&hi.1, t);
        }
    }
    last.1
}

/// Color for a wind speed given in knots.
pub fn wind_speed_color(knots: f64) -> Rgb {
    interpolate(&WIND_COLOR_STOPS, knots)
}
