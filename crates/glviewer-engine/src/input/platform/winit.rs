use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, InputState, Key, KeyState, PointerMotionEvent};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            // While captured, raw device motion is the only motion source.
            if state.pointer_captured {
                return None;
            }

            let (dx, dy) = match state.cursor_raw {
                Some((px, py)) => (position.x - px, py - position.y),
                None => (0.0, 0.0),
            };
            let height = f64::from(window.inner_size().height);

            Some(InputEvent::PointerMotion(PointerMotionEvent {
                x: position.x as f32,
                y: (height - position.y) as f32,
                dx: dx as f32,
                dy: dy as f32,
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            let (key, code) = map_key(event.physical_key);

            Some(InputEvent::Key {
                key,
                state: st,
                code,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// Records the platform cursor position used to derive uncaptured motion deltas.
pub(crate) fn track_cursor(state: &mut InputState, event: &WindowEvent) {
    if let WindowEvent::CursorMoved { position, .. } = event {
        state.cursor_raw = Some((position.x, position.y));
    }
}

/// Translates raw device motion while the pointer is captured.
pub(crate) fn translate_device_event(state: &InputState, event: &DeviceEvent) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } if state.pointer_captured => {
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));
            Some(InputEvent::PointerMotion(PointerMotionEvent {
                x,
                y,
                dx: *dx as f32,
                // Device deltas grow downwards.
                dy: -*dy as f32,
            }))
        }
        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}
