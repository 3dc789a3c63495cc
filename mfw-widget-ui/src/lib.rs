//! Progressive-hydration mounting for marine forecast widgets.
//!
//! This crate provides:
//! - `page`: the `Page` abstraction over the host document and its containers
//! - `registry`: `MountRegistry`, at most one live render root per container
//! - `controller`: the `WidgetFamily` strategy trait and the generic `Controller`
//!   driving discovery, data events and teardown
//! - `families`: one strategy per widget family (charts, weather, tides, ...)
//! - `js_bridge`: Rust wrappers for the D3.js renderers via `js_sys::eval()`
//! - `dom`: the browser `Page` implementation on top of `web-sys`
//! - `bootstrap`: entry point shared by the per-family WASM binaries

pub mod bootstrap;
pub mod controller;
pub mod dom;
pub mod error;
pub mod families;
pub mod js_bridge;
pub mod page;
pub mod registry;
pub mod tree;
