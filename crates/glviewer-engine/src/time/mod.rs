//! Time subsystem.
//!
//! `IntervalTimer` drives recurring fixed-interval callbacks scheduled through
//! `RuntimeCtx::schedule_interval`. It is polled with explicit instants so it
//! stays testable without the runtime.

mod interval;

pub use interval::{IntervalTimer, TimerId};
