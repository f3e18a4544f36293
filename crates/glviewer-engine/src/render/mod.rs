//! GPU rendering subsystem.
//!
//! Renders a single shader program over a full-screen quad.
//!
//! Convention:
//! - Quad geometry is in clip space (`-1..1`, +Y up).
//! - Programs are WGSL modules with `vs_main` / `fs_main` entry points and
//!   `var<uniform>` globals in `@group(0)`, one binding per uniform.

mod ctx;
pub mod program;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::FullscreenQuad;
