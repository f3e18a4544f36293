use anyhow::Context;
use glviewer_bindings::{BindingConfig, HostEvent, ProgramBindings, UniformProgram};
use glviewer_engine::core::{App, AppControl, EventCtx, FrameCtx};
use glviewer_engine::input::{InputEvent, Key, KeyState};
use glviewer_engine::render::FullscreenQuad;
use glviewer_engine::render::program::{CompiledModule, ShaderProgram};
use glviewer_engine::time::TimerId;
use winit::dpi::PhysicalSize;

use crate::host::{Routes, WindowBridge};

/// GPU-side state, created once the window exists.
struct Running {
    bindings: ProgramBindings<ShaderProgram>,
    quad: FullscreenQuad,
    routes: Routes,
}

/// Draws one shader program over the whole window and keeps its live
/// inputs up to date.
pub struct Viewer {
    module: Option<CompiledModule>,
    config: BindingConfig,
    running: Option<Running>,
}

impl Viewer {
    pub fn new(module: CompiledModule, config: BindingConfig) -> Self {
        Self {
            module: Some(module),
            config,
            running: None,
        }
    }

    fn forward(&mut self, ctx: &mut EventCtx<'_, '_>, event: Option<HostEvent>) -> AppControl {
        let (Some(running), Some(event)) = (self.running.as_mut(), event) else {
            return AppControl::Continue;
        };

        match running.bindings.handle(&event, ctx.window.screen_size()) {
            Ok(true) => {
                ctx.runtime.request_redraw();
                AppControl::Continue
            }
            Ok(false) => AppControl::Continue,
            Err(e) => {
                log::error!("failed to update uniform: {e}");
                AppControl::Exit
            }
        }
    }
}

impl App for Viewer {
    fn on_start(&mut self, ctx: &mut EventCtx<'_, '_>) -> anyhow::Result<()> {
        let module = self.module.take().context("viewer already started")?;

        let program = ShaderProgram::new(ctx.gpu.device(), ctx.gpu.surface_format(), &module);
        let quad = FullscreenQuad::new(ctx.gpu.device());

        let mut bindings = ProgramBindings::with_config(program, self.config.clone());
        let mut routes = Routes::default();
        let screen = ctx.window.screen_size();
        let bound = bindings
            .register(&mut WindowBridge::new(ctx.runtime, &mut routes, screen))
            .context("failed to bind shader inputs")?
            .len();
        log::info!(
            "viewer started: {bound} live input(s), {} declared uniform(s)",
            bindings.program().declared_uniforms().len()
        );

        ctx.runtime.request_redraw();
        self.running = Some(Running {
            bindings,
            quad,
            routes,
        });
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut EventCtx<'_, '_>, size: PhysicalSize<u32>) -> AppControl {
        let event = self
            .running
            .as_ref()
            .and_then(|r| r.routes.resize(size.width, size.height));
        self.forward(ctx, event)
    }

    fn on_input(&mut self, ctx: &mut EventCtx<'_, '_>, event: &InputEvent) -> AppControl {
        if let InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            ..
        } = event
        {
            log::info!("escape pressed, closing");
            return AppControl::Exit;
        }

        let event = self.running.as_ref().and_then(|r| r.routes.input(event));
        self.forward(ctx, event)
    }

    fn on_timer(&mut self, ctx: &mut EventCtx<'_, '_>, id: TimerId, dt: f32) -> AppControl {
        let event = self.running.as_ref().and_then(|r| r.routes.tick(id, dt));
        self.forward(ctx, event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(running) = self.running.as_mut() else {
            return AppControl::Continue;
        };
        let Running { bindings, quad, .. } = running;

        ctx.render(wgpu::Color::BLACK, |rctx, target| {
            let active = bindings.program_mut().activate(rctx.queue);
            {
                let mut rpass = target.begin_pass("glviewer program pass", wgpu::LoadOp::Load);
                active.draw(&mut rpass, quad);
            }
            active.deactivate();
        })
    }
}
