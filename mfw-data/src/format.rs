//! Display formatting for heights, temperatures, wind and time labels.

use chrono::{DateTime, FixedOffset, Utc};
use mfw_forecast::units::{SurfHeightUnit, TemperatureUnit, WindSpeedUnit};

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a height already converted to `unit`: meters keep one decimal,
/// feet are whole numbers.
pub fn format_height(value: f64, unit: SurfHeightUnit) -> String {
    match unit {
        SurfHeightUnit::Meters => format!("{:.1}{}", value, unit.suffix()),
        SurfHeightUnit::Feet => format!("{:.0}{}", value, unit.suffix()),
    }
}

/// Format a min-max surf range, collapsing to one value when both round equal.
pub fn format_height_range(min: f64, max: f64, unit: SurfHeightUnit) -> String {
    let (lo, hi) = match unit {
        SurfHeightUnit::Meters => (format!("{:.1}", min), format!("{:.1}", max)),
        SurfHeightUnit::Feet => (format!("{:.0}", min), format!("{:.0}", max)),
    };
    if lo == hi {
        format!("{}{}", lo, unit.suffix())
    } else {
        format!("{}-{}{}", lo, hi, unit.suffix())
    }
}

pub fn format_temperature(value: f64, unit: TemperatureUnit) -> String {
    format!("{:.0}{}", value, unit.suffix())
}

pub fn format_wind_speed(value: f64, unit: WindSpeedUnit) -> String {
    format!("{:.0} {}", value, unit.suffix())
}

pub fn format_period(seconds: f64) -> String {
    format!("{:.0}s", seconds)
}

pub fn format_energy(kilojoules: f64) -> String {
    format!("{:.0} kJ", kilojoules)
}

/// Short label for a chart x-axis tick, e.g. "Sat 06h", in spot-local time.
pub fn time_label(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    timestamp.with_timezone(offset).format("%a %Hh").to_string()
}

/// Spot-local calendar day key ("YYYY-MM-DD") used to group timesteps.
pub fn day_key(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    timestamp.with_timezone(offset).format("%Y-%m-%d").to_string()
}

/// Long day heading for report cards, e.g. "Saturday 18 Oct".
pub fn day_heading(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    timestamp.with_timezone(offset).format("%A %-d %b").to_string()
}

/// Hour label for tide and weather tables, e.g. "14:30".
pub fn clock_label(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    timestamp.with_timezone(offset).format("%H:%M").to_string()
}

pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        0 => "Flat",
        1 => "Poor",
        2 => "Poor to Fair",
        3 => "Fair",
        4 => "Good",
        _ => "Epic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_height() {
        assert_eq!(format_height(1.26, SurfHeightUnit::Meters), "1.3m");
        assert_eq!(format_height(4.4, SurfHeightUnit::Feet), "4ft");
        assert_eq!(format_height_range(3.2, 4.6, SurfHeightUnit::Feet), "3-5ft");
        assert_eq!(format_height_range(1.02, 1.04, SurfHeightUnit::Meters), "1.0m");
    }

    #[test]
    fn test_format_other_units() {
        assert_eq!(format_temperature(17.6, TemperatureUnit::Celsius), "18°C");
        assert_eq!(format_wind_speed(12.2, WindSpeedUnit::Kmh), "12 km/h");
        assert_eq!(format_period(11.6), "12s");
        assert_eq!(format_energy(412.3), "412 kJ");
        assert_eq!(round1(2.345), 2.3);
    }

    #[test]
    fn test_time_labels_use_spot_offset() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 2, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(time_label(&ts, &utc), "Sun 02h");
        assert_eq!(time_label(&ts, &pacific), "Sat 19h");
        assert_eq!(day_key(&ts, &pacific), "2026-10-17");
        assert_eq!(day_heading(&ts, &utc), "Sunday 18 Oct");
        assert_eq!(clock_label(&ts, &pacific), "19:00");
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!(rating_label(0), "Flat");
        assert_eq!(rating_label(3), "Fair");
        assert_eq!(rating_label(9), "Epic");
    }
}
