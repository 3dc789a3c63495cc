//! Data processing for marine forecast widgets.
//!
//! This crate turns raw host payloads into the shapes the chart renderers
//! consume. Everything here is pure: no DOM, no logging side effects beyond
//! warnings about dropped samples.

pub mod chart;
pub mod color;
pub mod compare;
pub mod compass;
pub mod format;
pub mod merge;
pub mod report;
pub mod tides;
pub mod weather;
