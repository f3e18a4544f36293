use std::time::Duration;

use crate::cursor::CursorOffset;
use crate::error::{RegisterError, UniformError};
use crate::host::{HostEvent, ScreenSize, Subscription, WindowHost};
use crate::program::UniformProgram;
use crate::uniform::{UniformKind, UniformValue};

/// The uniform inputs the registry knows how to drive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LiveInput {
    /// Seconds elapsed, accumulated from clock ticks.
    Time,
    /// Window size in physical pixels.
    Resolution,
    /// Accumulated screen-normalized pointer displacement.
    Mouse,
}

impl LiveInput {
    /// Registration order.
    pub const ALL: [LiveInput; 3] = [LiveInput::Time, LiveInput::Resolution, LiveInput::Mouse];

    /// Uniform name the program must declare.
    pub const fn name(self) -> &'static str {
        match self {
            LiveInput::Time => "time",
            LiveInput::Resolution => "resolution",
            LiveInput::Mouse => "mouse",
        }
    }

    pub const fn expected_kind(self) -> UniformKind {
        match self {
            LiveInput::Time => UniformKind::Float,
            LiveInput::Resolution | LiveInput::Mouse => UniformKind::Vec2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|input| input.name() == name)
    }

    fn subscription(self, config: &BindingConfig) -> Subscription {
        match self {
            LiveInput::Time => Subscription::Tick {
                interval: config.tick_interval,
            },
            LiveInput::Resolution => Subscription::Resize,
            LiveInput::Mouse => Subscription::Motion,
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct BindingConfig {
    /// Interval of the recurring tick that drives `time`.
    pub tick_interval: Duration,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / 60.0),
        }
    }
}

/// A live input bound to its producer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Binding {
    pub input: LiveInput,
    pub subscription: Subscription,
}

#[derive(Debug)]
enum State {
    Unregistered,
    Registered(Vec<Binding>),
}

/// Program Binding Registry.
///
/// Owns a compiled program and, once [`register`](Self::register)ed with a
/// window, updates the program's live input uniforms from the events the
/// window forwards to [`handle`](Self::handle).
///
/// Bindings are decided once from the program's declared uniforms and never
/// change afterwards.
#[derive(Debug)]
pub struct ProgramBindings<P> {
    program: P,
    config: BindingConfig,
    cursor: CursorOffset,
    state: State,
}

impl<P: UniformProgram> ProgramBindings<P> {
    pub fn new(program: P) -> Self {
        Self::with_config(program, BindingConfig::default())
    }

    pub fn with_config(program: P, config: BindingConfig) -> Self {
        Self {
            program,
            config,
            cursor: CursorOffset::new(),
            state: State::Unregistered,
        }
    }

    /// Subscribes one producer per live input the program declares.
    ///
    /// - `time` subscribes a recurring tick at the configured interval.
    /// - `resolution` subscribes resize notifications.
    /// - `mouse` enables exclusive pointer capture, then subscribes motion.
    ///
    /// Kinds are checked before anything is subscribed, so a failed
    /// registration leaves the host untouched. Registering twice fails with
    /// [`RegisterError::AlreadyRegistered`].
    pub fn register<H>(&mut self, host: &mut H) -> Result<&[Binding], RegisterError>
    where
        H: WindowHost + ?Sized,
    {
        if matches!(self.state, State::Registered(_)) {
            return Err(RegisterError::AlreadyRegistered);
        }

        let mut inputs = Vec::with_capacity(LiveInput::ALL.len());
        for input in LiveInput::ALL {
            let Some(found) = self.program.uniform_kind(input.name()) else {
                continue;
            };
            if found != input.expected_kind() {
                return Err(RegisterError::KindMismatch {
                    name: input.name(),
                    expected: input.expected_kind(),
                    found,
                });
            }
            inputs.push(input);
        }

        for name in self.program.declared_uniforms().names() {
            if LiveInput::from_name(name).is_none() {
                log::debug!("uniform `{name}` has no producer; left at its default");
            }
        }

        let mut bindings = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input == LiveInput::Mouse {
                let screen = host.screen_size();
                if !screen.is_known() {
                    log::warn!(
                        "screen size unknown ({}x{}); `mouse` deltas on that axis pass through unscaled",
                        screen.width,
                        screen.height
                    );
                }
                host.set_exclusive_pointer(true);
            }

            let subscription = input.subscription(&self.config);
            host.subscribe(subscription);
            log::debug!("bound `{}` to {subscription:?}", input.name());

            bindings.push(Binding {
                input,
                subscription,
            });
        }

        log::info!("registered {} live input(s)", bindings.len());
        self.state = State::Registered(bindings);
        Ok(self.bindings())
    }

    /// Runs the producer bound to `event`, if any.
    ///
    /// `screen` is the screen size of the window the event came from; it
    /// normalizes motion deltas. Returns `true` when a uniform was written.
    pub fn handle(&mut self, event: &HostEvent, screen: ScreenSize) -> Result<bool, UniformError> {
        match *event {
            HostEvent::Tick { dt } => {
                if !self.is_bound(LiveInput::Time) {
                    return Ok(false);
                }
                let name = LiveInput::Time.name();
                let current = match self.program.uniform_value(name) {
                    Some(UniformValue::Float(t)) => t,
                    _ => 0.0,
                };
                self.program.set_uniform(name, UniformValue::Float(current + dt))?;
            }

            HostEvent::Resized { width, height } => {
                if !self.is_bound(LiveInput::Resolution) {
                    return Ok(false);
                }
                self.program.set_uniform(
                    LiveInput::Resolution.name(),
                    UniformValue::Vec2([width as f32, height as f32]),
                )?;
            }

            HostEvent::Motion { dx, dy, .. } => {
                if !self.is_bound(LiveInput::Mouse) {
                    return Ok(false);
                }
                let offset = self.cursor.accumulate(dx, dy, screen);
                self.program
                    .set_uniform(LiveInput::Mouse.name(), UniformValue::Vec2(offset))?;
            }
        }

        Ok(true)
    }

    /// Bindings made by [`register`](Self::register); empty before it.
    pub fn bindings(&self) -> &[Binding] {
        match &self.state {
            State::Unregistered => &[],
            State::Registered(bindings) => bindings,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.state, State::Registered(_))
    }

    pub fn is_bound(&self, input: LiveInput) -> bool {
        self.bindings().iter().any(|b| b.input == input)
    }

    pub fn cursor_offset(&self) -> [f32; 2] {
        self.cursor.get()
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut P {
        &mut self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{HostCall, MockProgram, RecordingHost};

    const SCREEN: ScreenSize = ScreenSize::new(800, 600);

    fn registered(program: MockProgram) -> (ProgramBindings<MockProgram>, RecordingHost) {
        let mut bindings = ProgramBindings::new(program);
        let mut host = RecordingHost::with_screen(SCREEN.width, SCREEN.height);
        bindings.register(&mut host).unwrap();
        (bindings, host)
    }

    // ── LiveInput ─────────────────────────────────────────────────────────

    #[test]
    fn live_input_names_round_trip() {
        for input in LiveInput::ALL {
            assert_eq!(LiveInput::from_name(input.name()), Some(input));
        }
        assert_eq!(LiveInput::from_name("Time"), None);
    }

    #[test]
    fn default_tick_is_sixty_hertz() {
        let interval = BindingConfig::default().tick_interval;
        assert!((interval.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    // ── register ──────────────────────────────────────────────────────────

    #[test]
    fn unregistered_has_no_bindings() {
        let bindings = ProgramBindings::new(MockProgram::new().with_uniform("time", UniformKind::Float));
        assert!(!bindings.is_registered());
        assert!(bindings.bindings().is_empty());
    }

    #[test]
    fn time_subscribes_configured_tick() {
        let config = BindingConfig {
            tick_interval: Duration::from_millis(5),
        };
        let mut bindings =
            ProgramBindings::with_config(MockProgram::new().with_uniform("time", UniformKind::Float), config);
        let mut host = RecordingHost::with_screen(SCREEN.width, SCREEN.height);
        bindings.register(&mut host).unwrap();

        assert_eq!(
            host.calls,
            [HostCall::Subscribe(Subscription::Tick {
                interval: Duration::from_millis(5)
            })]
        );
    }

    #[test]
    fn mouse_enables_capture_before_subscribing_motion() {
        let (_, host) = registered(MockProgram::new().with_uniform("mouse", UniformKind::Vec2));
        assert_eq!(
            host.calls,
            [
                HostCall::SetExclusivePointer(true),
                HostCall::Subscribe(Subscription::Motion),
            ]
        );
    }

    #[test]
    fn unrecognized_uniforms_are_left_alone() {
        let (bindings, host) = registered(
            MockProgram::new()
                .with_uniform("brightness", UniformKind::Float)
                .with_uniform("resolution", UniformKind::Vec2),
        );
        assert_eq!(host.calls, [HostCall::Subscribe(Subscription::Resize)]);
        assert_eq!(bindings.bindings().len(), 1);
        assert_eq!(bindings.program().uniform_value("brightness"), Some(UniformValue::Float(0.0)));
    }

    #[test]
    fn second_register_is_rejected_without_side_effects() {
        let (mut bindings, mut host) = registered(MockProgram::new().with_uniform("time", UniformKind::Float));
        host.calls.clear();

        assert_eq!(bindings.register(&mut host).unwrap_err(), RegisterError::AlreadyRegistered);
        assert!(host.calls.is_empty());
        assert_eq!(bindings.bindings().len(), 1);
    }

    #[test]
    fn kind_mismatch_subscribes_nothing() {
        let mut bindings = ProgramBindings::new(
            MockProgram::new()
                .with_uniform("mouse", UniformKind::Vec2)
                .with_uniform("time", UniformKind::Vec2),
        );
        let mut host = RecordingHost::with_screen(SCREEN.width, SCREEN.height);

        let err = bindings.register(&mut host).unwrap_err();
        assert_eq!(
            err,
            RegisterError::KindMismatch {
                name: "time",
                expected: UniformKind::Float,
                found: UniformKind::Vec2,
            }
        );
        assert!(host.calls.is_empty());
        assert!(!bindings.is_registered());
    }

    // ── handle ────────────────────────────────────────────────────────────

    #[test]
    fn events_before_register_are_ignored() {
        let mut bindings = ProgramBindings::new(MockProgram::new().with_uniform("time", UniformKind::Float));
        assert!(!bindings.handle(&HostEvent::Tick { dt: 1.0 }, SCREEN).unwrap());
        assert_eq!(bindings.program().uniform_value("time"), Some(UniformValue::Float(0.0)));
    }

    #[test]
    fn tick_adds_to_current_time() {
        let (mut bindings, _) = registered(
            MockProgram::new().with_value("time", UniformValue::Float(10.0)),
        );
        bindings.handle(&HostEvent::Tick { dt: 0.5 }, SCREEN).unwrap();
        assert_eq!(bindings.program().uniform_value("time"), Some(UniformValue::Float(10.5)));
    }

    #[test]
    fn resize_writes_size_verbatim() {
        let (mut bindings, _) = registered(MockProgram::new().with_uniform("resolution", UniformKind::Vec2));
        assert!(bindings.handle(&HostEvent::Resized { width: 1920, height: 1080 }, SCREEN).unwrap());
        assert_eq!(
            bindings.program().uniform_value("resolution"),
            Some(UniformValue::Vec2([1920.0, 1080.0]))
        );
    }

    #[test]
    fn unbound_event_writes_nothing() {
        let (mut bindings, _) = registered(MockProgram::new().with_uniform("time", UniformKind::Float));
        let written = bindings
            .handle(&HostEvent::Motion { x: 0.0, y: 0.0, dx: 5.0, dy: 5.0 }, SCREEN)
            .unwrap();
        assert!(!written);
        assert_eq!(bindings.cursor_offset(), [0.0, 0.0]);
        assert_eq!(bindings.program().writes(), 0);
    }

    #[test]
    fn motion_with_unknown_screen_is_unscaled() {
        let (mut bindings, _) = registered(MockProgram::new().with_uniform("mouse", UniformKind::Vec2));
        bindings
            .handle(&HostEvent::Motion { x: 0.0, y: 0.0, dx: 2.0, dy: -3.0 }, ScreenSize::default())
            .unwrap();
        assert_eq!(bindings.program().uniform_value("mouse"), Some(UniformValue::Vec2([2.0, -3.0])));
    }
}
