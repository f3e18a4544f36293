//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the viewer window, wires them to the GPU
//! layer, and drives interval timers.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx, WindowMode};
