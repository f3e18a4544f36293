//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and the viewer. It avoids leaking runtime internals into user code and
//! provides consistent callback contexts.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{EventCtx, FrameCtx, WindowCtx};
