//! Glue between the engine's callbacks and the binding registry.

use glviewer_bindings::{HostEvent, ScreenSize, Subscription, WindowHost};
use glviewer_engine::input::InputEvent;
use glviewer_engine::time::TimerId;
use glviewer_engine::window::RuntimeCtx;

/// Engine events the registry subscribed to.
#[derive(Debug, Default)]
pub struct Routes {
    ticks: Vec<TimerId>,
    resize: bool,
    motion: bool,
}

impl Routes {
    pub fn tick(&self, id: TimerId, dt: f32) -> Option<HostEvent> {
        self.ticks.contains(&id).then_some(HostEvent::Tick { dt })
    }

    pub fn resize(&self, width: u32, height: u32) -> Option<HostEvent> {
        self.resize.then_some(HostEvent::Resized { width, height })
    }

    pub fn input(&self, event: &InputEvent) -> Option<HostEvent> {
        match event {
            InputEvent::PointerMotion(m) if self.motion => Some(HostEvent::Motion {
                x: m.x,
                y: m.y,
                dx: m.dx,
                dy: m.dy,
            }),
            _ => None,
        }
    }
}

/// [`WindowHost`] backed by the runtime's command buffer.
///
/// Subscriptions become runtime requests (interval timers, pointer capture)
/// and are recorded in [`Routes`] so later engine callbacks can be forwarded.
pub struct WindowBridge<'a> {
    runtime: &'a mut RuntimeCtx,
    routes: &'a mut Routes,
    screen: ScreenSize,
}

impl<'a> WindowBridge<'a> {
    pub fn new(runtime: &'a mut RuntimeCtx, routes: &'a mut Routes, screen: ScreenSize) -> Self {
        Self {
            runtime,
            routes,
            screen,
        }
    }
}

impl WindowHost for WindowBridge<'_> {
    fn subscribe(&mut self, subscription: Subscription) {
        match subscription {
            Subscription::Tick { interval } => {
                let id = self.runtime.schedule_interval(interval);
                self.routes.ticks.push(id);
            }
            Subscription::Resize => self.routes.resize = true,
            Subscription::Motion => self.routes.motion = true,
        }
        log::debug!("subscribed {subscription:?}");
    }

    fn set_exclusive_pointer(&mut self, enabled: bool) {
        self.runtime.set_exclusive_pointer(enabled);
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glviewer_bindings::mock::MockProgram;
    use glviewer_bindings::{ProgramBindings, UniformKind};
    use glviewer_engine::input::PointerMotionEvent;
    use std::time::Duration;

    fn motion(dx: f32, dy: f32) -> InputEvent {
        InputEvent::PointerMotion(PointerMotionEvent { x: 1.0, y: 2.0, dx, dy })
    }

    #[test]
    fn nothing_is_routed_without_subscriptions() {
        let routes = Routes::default();
        assert_eq!(routes.tick(TimerId::next(), 0.1), None);
        assert_eq!(routes.resize(640, 480), None);
        assert_eq!(routes.input(&motion(1.0, 1.0)), None);
    }

    #[test]
    fn subscriptions_open_routes() {
        let mut runtime = RuntimeCtx::default();
        let mut routes = Routes::default();
        let mut bridge = WindowBridge::new(&mut runtime, &mut routes, ScreenSize::new(800, 600));

        bridge.subscribe(Subscription::Resize);
        bridge.subscribe(Subscription::Motion);

        assert_eq!(routes.resize(640, 480), Some(HostEvent::Resized { width: 640, height: 480 }));
        assert_eq!(
            routes.input(&motion(3.0, -4.0)),
            Some(HostEvent::Motion { x: 1.0, y: 2.0, dx: 3.0, dy: -4.0 })
        );
        assert_eq!(routes.input(&InputEvent::Focused(true)), None);
    }

    #[test]
    fn only_scheduled_timers_are_routed() {
        let mut runtime = RuntimeCtx::default();
        let mut routes = Routes::default();
        let mut bridge = WindowBridge::new(&mut runtime, &mut routes, ScreenSize::new(800, 600));
        bridge.subscribe(Subscription::Tick {
            interval: Duration::from_millis(16),
        });

        let scheduled = routes.ticks[0];
        assert_eq!(routes.tick(scheduled, 0.016), Some(HostEvent::Tick { dt: 0.016 }));
        assert_eq!(routes.tick(TimerId::next(), 0.016), None);
    }

    #[test]
    fn registry_drives_routes_through_the_bridge() {
        let program = MockProgram::new()
            .with_uniform("time", UniformKind::Float)
            .with_uniform("mouse", UniformKind::Vec2);
        let mut bindings = ProgramBindings::new(program);

        let mut runtime = RuntimeCtx::default();
        let mut routes = Routes::default();
        let screen = ScreenSize::new(800, 600);
        let mut bridge = WindowBridge::new(&mut runtime, &mut routes, screen);
        bindings.register(&mut bridge).unwrap();

        assert_eq!(routes.ticks.len(), 1);
        assert!(routes.resize(1, 1).is_none());

        let event = routes.input(&motion(80.0, -60.0)).unwrap();
        assert!(bindings.handle(&event, screen).unwrap());
        let [x, y] = bindings.cursor_offset();
        assert!((x - 0.1).abs() < 1e-6 && (y + 0.1).abs() < 1e-6);
    }
}
