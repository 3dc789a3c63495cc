//! Unit preferences and conversions.
//!
//! Forecast data always arrives in meters, degrees Celsius and knots;
//! conversion to the reader's units happens once, during normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const FEET_PER_METER: f64 = 3.28084;
pub const KMH_PER_KNOT: f64 = 1.852;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfHeightUnit {
    Feet,
    #[default]
    Meters,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindSpeedUnit {
    #[default]
    Knots,
    Kmh,
}

/// The reader's display preferences, passed to every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPreferences {
    pub surf_height: SurfHeightUnit,
    pub temperature: TemperatureUnit,
    pub wind_speed: WindSpeedUnit,
    pub show_advanced_charts: bool,
}

/// A unit string the widgets do not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParseError(pub String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized unit: {}", self.0)
    }
}

impl std::error::Error for UnitParseError {}

impl FromStr for SurfHeightUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "feet" | "foot" | "imperial" => Ok(SurfHeightUnit::Feet),
            "m" | "meter" | "meters" | "metre" | "metres" | "metric" => Ok(SurfHeightUnit::Meters),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "°c" | "celsius" | "metric" => Ok(TemperatureUnit::Celsius),
            "f" | "°f" | "fahrenheit" | "imperial" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

impl FromStr for WindSpeedUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kt" | "kts" | "knot" | "knots" => Ok(WindSpeedUnit::Knots),
            "kmh" | "km/h" | "kph" => Ok(WindSpeedUnit::Kmh),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

impl SurfHeightUnit {
    /// Convert a height in meters into this unit.
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            SurfHeightUnit::Feet => meters * FEET_PER_METER,
            SurfHeightUnit::Meters => meters,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            SurfHeightUnit::Feet => "ft",
            SurfHeightUnit::Meters => "m",
        }
    }
}

impl TemperatureUnit {
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl WindSpeedUnit {
    pub fn from_knots(&self, knots: f64) -> f64 {
        match self {
            WindSpeedUnit::Knots => knots,
            WindSpeedUnit::Kmh => knots * KMH_PER_KNOT,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            WindSpeedUnit::Knots => "kts",
            WindSpeedUnit::Kmh => "km/h",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("FT".parse::<SurfHeightUnit>().unwrap(), SurfHeightUnit::Feet);
        assert_eq!("meters".parse::<SurfHeightUnit>().unwrap(), SurfHeightUnit::Meters);
        assert_eq!("fahrenheit".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!("km/h".parse::<WindSpeedUnit>().unwrap(), WindSpeedUnit::Kmh);
        assert!("furlongs".parse::<SurfHeightUnit>().is_err());
    }

    #[test]
    fn test_conversions() {
        assert!((SurfHeightUnit::Feet.from_meters(1.0) - 3.28084).abs() < 1e-9);
        assert_eq!(SurfHeightUnit::Meters.from_meters(2.5), 2.5);
        assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(100.0), 212.0);
        assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(-40.0), -40.0);
        assert!((WindSpeedUnit::Kmh.from_knots(10.0) - 18.52).abs() < 1e-9);
    }

    #[test]
    fn test_defaults() {
        let prefs = UnitPreferences::default();
        assert_eq!(prefs.surf_height, SurfHeightUnit::Meters);
        assert_eq!(prefs.temperature, TemperatureUnit::Celsius);
        assert_eq!(prefs.wind_speed, WindSpeedUnit::Knots);
        assert!(!prefs.show_advanced_charts);
    }
}
