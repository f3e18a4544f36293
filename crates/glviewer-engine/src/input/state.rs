use super::types::{InputEvent, PointerMotionEvent};

/// Pointer tracking for the viewer window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in physical pixels, y up.
    pub pointer_pos: Option<(f32, f32)>,

    /// Whether exclusive pointer capture is active.
    pub pointer_captured: bool,

    /// Last cursor position as reported by the platform (top-left origin).
    /// Used to derive motion deltas when the pointer is not captured.
    pub(crate) cursor_raw: Option<(f64, f64)>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMotion(PointerMotionEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                self.cursor_raw = None;
            }

            InputEvent::Key { .. } | InputEvent::Focused(_) => {}
        }
    }
}
