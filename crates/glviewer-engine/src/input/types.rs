/// Keyboard key identifier.
///
/// Only the keys the viewer reacts to are named. Everything else maps to
/// `Key::Unknown(u32)` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Pointer motion in physical pixels.
///
/// Both position and displacement use a y-up convention: `dy > 0` means the
/// pointer moved towards the top of the window. While the pointer is captured
/// `dx`/`dy` are raw device deltas and `x`/`y` hold the last known position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMotionEvent {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Runtime translates window system events into these.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Stable platform code when available.
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMotion(PointerMotionEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}
