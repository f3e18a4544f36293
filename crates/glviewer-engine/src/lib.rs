//! GlViewer engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the viewer:
//! window and event loop, wgpu device/surface, interval timers, input
//! translation, and shader programs drawn over a full-screen quad.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
