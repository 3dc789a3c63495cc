//! Resolution of host-supplied settings.
//!
//! Hosts have shipped unit preferences under several globals over time.
//! Instead of probing them ad hoc, callers collect the candidate objects in
//! priority order and ask for the first source that defines a key.

use crate::units::{SurfHeightUnit, TemperatureUnit, UnitPreferences, WindSpeedUnit};
use serde_json::Value;
use std::str::FromStr;

/// Window paths consulted for settings, highest priority first.
pub const SETTINGS_SOURCE_PATHS: [&[&str]; 3] = [
    &["__MFW_SETTINGS__"],
    &["userSettings"],
    &["__INITIAL_STATE__", "user", "settings"],
];

/// Return the first defined candidate.
pub fn resolve_first<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    candidates.into_iter().flatten().next()
}

/// Walk `path` through nested objects.
pub fn lookup_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

fn resolve_parsed<T: FromStr>(sources: &[Value], keys: &[&str]) -> Option<T> {
    resolve_first(sources.iter().map(|source| {
        resolve_first(keys.iter().map(|key| {
            let raw = source.get(*key)?.as_str()?;
            match raw.parse::<T>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    log::warn!("Ignoring unrecognized value {:?} for setting {}", raw, key);
                    None
                }
            }
        }))
    }))
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// Resolve unit preferences from candidate sources, falling back to defaults
/// field by field.
pub fn resolve_unit_preferences(sources: &[Value]) -> UnitPreferences {
    let defaults = UnitPreferences::default();
    UnitPreferences {
        surf_height: resolve_parsed::<SurfHeightUnit>(sources, &["surfHeightUnit", "surfHeight", "heightUnit"])
            .unwrap_or(defaults.surf_height),
        temperature: resolve_parsed::<TemperatureUnit>(sources, &["temperatureUnit", "temperature", "tempUnit"])
            .unwrap_or(defaults.temperature),
        wind_speed: resolve_parsed::<WindSpeedUnit>(sources, &["windSpeedUnit", "windSpeed", "windUnit"])
            .unwrap_or(defaults.wind_speed),
        show_advanced_charts: resolve_first(sources.iter().map(|source| {
            resolve_first(
                ["showAdvancedCharts", "advancedCharts"]
                    .iter()
                    .map(|key| source.get(*key).and_then(as_flag)),
            )
        }))
        .unwrap_or(defaults.show_advanced_charts),
    }
}
