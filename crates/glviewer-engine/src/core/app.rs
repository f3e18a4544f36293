use winit::dpi::PhysicalSize;

use crate::input::InputEvent;
use crate::time::TimerId;

use super::ctx::{EventCtx, FrameCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the viewer.
///
/// Callbacks run on the event loop thread. Requests made through
/// `ctx.runtime` are applied after the callback returns.
pub trait App {
    /// Called once, after the window and GPU context exist and before any
    /// other callback. An error ends the run and is returned from
    /// [`Runtime::run`](crate::window::Runtime::run).
    fn on_start(&mut self, ctx: &mut EventCtx<'_, '_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called with the drawable size in physical pixels. The first call
    /// happens right after `on_start`.
    fn on_resize(&mut self, ctx: &mut EventCtx<'_, '_>, size: PhysicalSize<u32>) -> AppControl {
        let _ = (ctx, size);
        AppControl::Continue
    }

    fn on_input(&mut self, ctx: &mut EventCtx<'_, '_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called when an interval scheduled through
    /// [`RuntimeCtx::schedule_interval`](crate::window::RuntimeCtx::schedule_interval)
    /// fires. `dt` is the elapsed time since its previous fire, in seconds.
    fn on_timer(&mut self, ctx: &mut EventCtx<'_, '_>, id: TimerId, dt: f32) -> AppControl {
        let _ = (ctx, id, dt);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
