//! Uniform binding registry for the **glviewer** shader preview host.
//!
//! Given a compiled shader program, [`ProgramBindings`] inspects which of the
//! live inputs (`time`, `resolution`, `mouse`) the program declares and
//! subscribes exactly one producer per declared input with the host window.
//! Events delivered back through [`ProgramBindings::handle`] update the
//! program's uniform values.
//!
//! The crate has no GPU or windowing dependencies. Programs and windows are
//! reached through the [`UniformProgram`] and [`WindowHost`] traits.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`uniform`] | `UniformKind`, `UniformValue`, `UniformSet` |
//! | [`program`] | `UniformProgram` trait |
//! | [`host`] | `WindowHost` trait, `Subscription`, `HostEvent`, `ScreenSize` |
//! | [`cursor`] | `CursorOffset` accumulator |
//! | [`registry`] | `ProgramBindings`, `LiveInput`, `BindingConfig` |
//! | [`error`] | `UniformError`, `RegisterError` |
//! | [`mock`] | in-memory program and recording host for tests |
//!
//! # Quick start
//!
//! ```rust
//! use glviewer_bindings::mock::{MockProgram, RecordingHost};
//! use glviewer_bindings::{HostEvent, ProgramBindings, ScreenSize, UniformKind, UniformProgram, UniformValue};
//!
//! let program = MockProgram::new().with_uniform("mouse", UniformKind::Vec2);
//! let mut bindings = ProgramBindings::new(program);
//!
//! let mut host = RecordingHost::with_screen(800, 600);
//! bindings.register(&mut host).unwrap();
//!
//! let screen = ScreenSize::new(800, 600);
//! bindings
//!     .handle(&HostEvent::Motion { x: 0.0, y: 0.0, dx: 80.0, dy: -60.0 }, screen)
//!     .unwrap();
//!
//! assert_eq!(
//!     bindings.program().uniform_value("mouse"),
//!     Some(UniformValue::Vec2([0.1, -0.1]))
//! );
//! ```

pub mod cursor;
pub mod error;
pub mod host;
pub mod mock;
pub mod program;
pub mod registry;
pub mod uniform;

pub use cursor::CursorOffset;
pub use error::{RegisterError, UniformError};
pub use host::{HostEvent, ScreenSize, Subscription, WindowHost};
pub use program::UniformProgram;
pub use registry::{Binding, BindingConfig, LiveInput, ProgramBindings};
pub use uniform::{UniformKind, UniformSet, UniformValue};
