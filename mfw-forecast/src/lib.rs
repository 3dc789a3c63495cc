//! Core types shared by every marine forecast widget family.
//!
//! - `forecast`: per-timestep model output and the two-model forecast shape
//! - `weather` / `tide`: hourly weather arrays and tide readings
//! - `event`: the `bigpipe:<family>-data` event schema and per-family payloads
//! - `units`: unit preferences and conversions
//! - `settings`: ordered resolution of host-supplied settings

pub mod event;
pub mod forecast;
pub mod settings;
pub mod tide;
pub mod units;
pub mod weather;
