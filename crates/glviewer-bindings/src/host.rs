//! Window boundary consumed by the registry.

use std::time::Duration;

/// Physical screen dimensions in pixels.
///
/// A zero dimension means the window could not report its screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions were reported.
    pub const fn is_known(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}

/// An event source the registry asks the host to forward.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Subscription {
    /// Recurring clock tick at a fixed interval.
    Tick { interval: Duration },
    /// Window resize notifications.
    Resize,
    /// Pointer motion notifications.
    Motion,
}

/// An event forwarded by the host for an active subscription.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostEvent {
    /// `dt` is the wall-clock time since the previous tick, in seconds.
    Tick { dt: f32 },
    Resized { width: u32, height: u32 },
    /// Pointer position and relative displacement in physical pixels, y up.
    Motion { x: f32, y: f32, dx: f32, dy: f32 },
}

/// The host window as seen by the registry.
pub trait WindowHost {
    /// Starts forwarding events of the given kind.
    fn subscribe(&mut self, subscription: Subscription);

    /// Toggles exclusive pointer capture: the cursor is hidden and motion
    /// is reported as raw relative displacement.
    fn set_exclusive_pointer(&mut self, enabled: bool);

    /// Dimensions of the screen the window is on. Zero while unknown.
    fn screen_size(&self) -> ScreenSize;
}
