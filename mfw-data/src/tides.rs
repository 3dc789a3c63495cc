//! Tide series normalization and interpolation.

use crate::format::{clock_label, format_height};
use chrono::{DateTime, FixedOffset, Utc};
use mfw_forecast::tide::{TideKind, TideReading};
use mfw_forecast::units::UnitPreferences;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TidePoint {
    pub time: DateTime<Utc>,
    pub label: String,
    /// Height in the reader's surf height unit.
    pub height: f64,
    pub display: String,
    pub kind: Option<TideKind>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sort, convert and classify a tide series.
///
/// Non-finite heights are dropped and duplicate timestamps keep the last
/// sample. When the host marked no highs or lows, local extrema are
/// classified from the series itself.
pub fn normalize_tides(
    readings: &[TideReading],
    prefs: &UnitPreferences,
    offset: &FixedOffset,
) -> Vec<TidePoint> {
    let mut sorted: Vec<&TideReading> = readings
        .iter()
        .filter(|r| {
            let finite = r.height.is_finite();
            if !finite {
                log::warn!("Dropping tide reading at {} with invalid height", r.time);
            }
            finite
        })
        .collect();
    sorted.sort_by_key(|r| r.time);

    let mut points: Vec<TidePoint> = Vec::with_capacity(sorted.len());
    for reading in sorted {
        let height = round2(prefs.surf_height.from_meters(reading.height));
        let point = TidePoint {
            time: reading.time,
            label: clock_label(&reading.time, offset),
            height,
            display: format_height(height, prefs.surf_height),
            kind: reading.kind,
        };
        if let Some(last) = points.last_mut() {
            if last.time == point.time {
                *last = point;
                continue;
            }
        }
        points.push(point);
    }

    if points.iter().all(|p| p.kind.is_none()) {
        classify_extremes(&mut points);
    }
    points
}

fn classify_extremes(points: &mut [TidePoint]) {
    let heights: Vec<f64> = points.iter().map(|p| p.height).collect();
    for i in 1..heights.len().saturating_sub(1) {
        let (prev, here, next) = (heights[i - 1], heights[i], heights[i + 1]);
        if here >= prev && here > next {
            points[i].kind = Some(TideKind::High);
        } else if here <= prev && here < next {
            points[i].kind = Some(TideKind::Low);
        }
    }
}

/// High and low water points only.
pub fn extremes(points: &[TidePoint]) -> Vec<TidePoint> {
    points.iter().filter(|p| p.kind.is_some()).cloned().collect()
}

/// Linearly interpolated height at `time`, `None` outside the series.
pub fn tide_height_at(points: &[TidePoint], time: DateTime<Utc>) -> Option<f64> {
    let first = points.first()?;
    if time == first.time {
        return Some(first.height);
    }
    points.windows(2).find_map(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        if time < a.time || time > b.time {
            return None;
        }
        let span = (b.time - a.time).num_seconds() as f64;
        if span <= 0.0 {
            return Some(b.height);
        }
        let t = (time - a.time).num_seconds() as f64 / span;
        Some(round2(a.height + (b.height - a.height) * t))
    })
}

/// Whether the tide is rising at `time`, judged from the surrounding samples.
pub fn is_rising(points: &[TidePoint], time: DateTime<Utc>) -> Option<bool> {
    points
        .windows(2)
        .find(|pair| time >= pair[0].time && time <= pair[1].time)
        .map(|pair| pair[1].height > pair[0].height)
}
