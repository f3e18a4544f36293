use anyhow::{Context, Result};
use ouroboros::self_referencing;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, EventCtx, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::{track_cursor, translate_device_event, translate_window_event};
use crate::input::{InputEvent, InputState};
use crate::time::{IntervalTimer, TimerId};

/// How the window occupies the screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WindowMode {
    #[default]
    Windowed,
    /// Borderless fullscreen on the current monitor.
    Fullscreen,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    pub mode: WindowMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glviewer".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            resizable: true,
            mode: WindowMode::Windowed,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Schedules `App::on_timer` to be called every `interval`.
    pub fn schedule_interval(&mut self, interval: Duration) -> TimerId {
        let id = TimerId::next();
        self.commands.push(Command::ScheduleInterval(id, interval));
        id
    }

    /// Hides the cursor and switches motion reporting to raw relative
    /// displacement, or restores normal pointer behavior.
    pub fn set_exclusive_pointer(&mut self, enabled: bool) {
        self.commands.push(Command::SetExclusivePointer(enabled));
    }

    pub fn request_redraw(&mut self) {
        self.commands.push(Command::RequestRedraw);
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    ScheduleInterval(TimerId, Duration),
    SetExclusivePointer(bool),
    RequestRedraw,
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, drives `app` until it exits, and returns the first
    /// fatal error raised during startup.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    timers: Vec<IntervalTimer>,
    /// Capture state requested by the app; re-applied when focus returns.
    pointer_requested: bool,

    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            timers: Vec::new(),
            pointer_requested: false,
            exit_requested: false,
            error: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.request_exit();
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        if self.config.mode == WindowMode::Fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    /// Runs one non-rendering callback and applies the commands it issued.
    fn dispatch<F>(&mut self, event_loop: &ActiveEventLoop, f: F)
    where
        F: FnOnce(&mut A, &mut EventCtx<'_, '_>) -> AppControl,
    {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let (control, mut runtime_ctx) = with_event_ctx(app, entry, f);
        if control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::ScheduleInterval(id, interval) => {
                    let timer = IntervalTimer::new(id, interval, Instant::now());
                    log::debug!("timer {:?} scheduled every {:?}", id, timer.interval());
                    self.timers.push(timer);
                }
                Command::SetExclusivePointer(enabled) => {
                    self.pointer_requested = enabled;
                    self.sync_pointer_capture();
                }
                Command::RequestRedraw => {
                    if let Some(entry) = &self.entry {
                        entry.with_window(|w| w.request_redraw());
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn sync_pointer_capture(&mut self) {
        let enabled = self.pointer_requested;
        if let Some(entry) = self.entry.as_mut() {
            entry.with_mut(|fields| {
                fields.input_state.pointer_captured = apply_pointer_capture(fields.window, enabled);
            });
        }
    }

    fn resize(&mut self, event_loop: &ActiveEventLoop, new_size: PhysicalSize<u32>) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        entry.with_window(|w| w.request_redraw());

        self.dispatch(event_loop, |app, ctx| app.on_resize(ctx, new_size));
    }

    fn fire_due_timers(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let fired: Vec<(TimerId, f32)> = self
            .timers
            .iter_mut()
            .filter_map(|t| t.poll(now).map(|dt| (t.id(), dt)))
            .collect();

        for (id, dt) in fired {
            self.dispatch(event_loop, |app, ctx| app.on_timer(ctx, id, dt));
            if self.exit_requested {
                return;
            }
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        let mut entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => {
                self.fail(event_loop, e.context("failed to create viewer window"));
                return;
            }
        };
        let size = entry.with_window(|w| w.inner_size());
        let (start_result, runtime_ctx) =
            with_event_ctx(&mut self.app, &mut entry, |app, ctx| app.on_start(ctx));
        self.entry = Some(entry);

        if let Err(e) = start_result {
            self.fail(event_loop, e);
            return;
        }
        self.apply_commands(event_loop, runtime_ctx);

        // Deliver the initial size so size-dependent state is populated
        // before the first frame.
        if !self.exit_requested {
            self.resize(event_loop, size);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        self.fire_due_timers(event_loop);

        match self.timers.iter().map(IntervalTimer::next_due).min() {
            Some(due) => event_loop.set_control_flow(ControlFlow::WaitUntil(due)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let input = entry.with_mut(|fields| {
            let ev = translate_window_event(fields.window, fields.input_state, &event);
            track_cursor(fields.input_state, &event);
            if let Some(ev) = &ev {
                fields.input_state.apply_event(ev);
            }
            ev
        });

        if let Some(ev) = input {
            if ev == InputEvent::Focused(true) && self.pointer_requested {
                self.sync_pointer_capture();
            }
            self.dispatch(event_loop, |app, ctx| app.on_input(ctx, &ev));
            if self.exit_requested {
                event_loop.exit();
                return;
            }
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(event_loop, *new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size()));
                if let Some(new_size) = new_size {
                    self.resize(event_loop, new_size);
                }
            }

            WindowEvent::RedrawRequested => {
                let mut runtime_ctx = RuntimeCtx::default();
                let mut app_control = AppControl::Continue;

                // Split borrows to avoid `self` capture inside `ouroboros` closures.
                let (app, entry) = (&mut self.app, &mut self.entry);
                if let Some(entry) = entry.as_mut() {
                    entry.with_mut(|fields| {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            input: fields.input_state,
                            runtime: &mut runtime_ctx,
                        };

                        app_control = app.on_frame(&mut ctx);
                    });
                }

                if app_control == AppControl::Exit {
                    runtime_ctx.exit();
                }

                self.apply_commands(event_loop, runtime_ctx);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let input = self
            .entry
            .as_ref()
            .and_then(|e| e.with_input_state(|state| translate_device_event(state, &event)));
        if let Some(ev) = input {
            self.dispatch(event_loop, |app, ctx| app.on_input(ctx, &ev));
        }
    }
}

fn with_event_ctx<A, F, R>(app: &mut A, entry: &mut WindowEntry, f: F) -> (R, RuntimeCtx)
where
    A: CoreApp,
    F: FnOnce(&mut A, &mut EventCtx<'_, '_>) -> R,
{
    let mut runtime_ctx = RuntimeCtx::default();
    let out = entry.with_mut(|fields| {
        let mut ctx = EventCtx {
            window: WindowCtx {
                window: fields.window,
            },
            gpu: &*fields.gpu,
            input: &*fields.input_state,
            runtime: &mut runtime_ctx,
        };
        f(app, &mut ctx)
    });
    (out, runtime_ctx)
}

/// Applies the requested capture state to `window` and returns whether raw
/// relative motion is now in effect.
fn apply_pointer_capture(window: &Window, enabled: bool) -> bool {
    if !enabled {
        if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("failed to release pointer: {e}");
        }
        window.set_cursor_visible(true);
        return false;
    }

    window.set_cursor_visible(false);

    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

    match grabbed {
        Ok(()) => {
            log::debug!("pointer captured");
            true
        }
        Err(e) => {
            log::warn!("exclusive pointer capture unavailable, using cursor deltas: {e}");
            false
        }
    }
}
