use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta, PointerButtonEvent, PointerMoveEvent,
};

/// Converts a winit window event into an [`InputEvent`], or `None` for events
/// that carry no input. Positions are divided by `scale_factor` so the result
/// is in logical pixels.
///
/// winit 0.30 attaches no position to button and wheel events, so those use
/// the pointer position tracked in `state`. A wheel event with no known
/// pointer position is dropped.
pub fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(scale_factor, *position);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::MouseInput { state: pressed, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: (*button).into(),
                state: (*pressed).into(),
                x,
                y,
                modifiers: state.modifiers,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = state.pointer_pos?;
            InputEvent::MouseWheel {
                delta: wheel_delta(scale_factor, *delta),
                x,
                y,
                modifiers: state.modifiers,
            }
        }
        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: event.physical_key.into(),
            state: event.state.into(),
            modifiers: state.modifiers,
            repeat: event.repeat,
        },
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(m.state().into()),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        _ => return None,
    };
    Some(ev)
}

fn logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let pos = pos.to_logical::<f32>(scale_factor);
    (pos.x, pos.y)
}

fn wheel_delta(scale_factor: f64, delta: MouseScrollDelta) -> MouseWheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = logical(scale_factor, p);
            MouseWheelDelta::Pixel { x, y }
        }
    }
}

impl From<ElementState> for MouseButtonState {
    fn from(s: ElementState) -> Self {
        if s.is_pressed() { Self::Pressed } else { Self::Released }
    }
}

impl From<ElementState> for KeyState {
    fn from(s: ElementState) -> Self {
        if s.is_pressed() { Self::Pressed } else { Self::Released }
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(m: ModifiersState) -> Self {
        Self { shift: m.shift_key(), ctrl: m.control_key(), alt: m.alt_key(), meta: m.super_key() }
    }
}

impl From<WinitButton> for MouseButton {
    fn from(b: WinitButton) -> Self {
        match b {
            WinitButton::Left => Self::Left,
            WinitButton::Right => Self::Right,
            WinitButton::Middle => Self::Middle,
            WinitButton::Back => Self::Back,
            WinitButton::Forward => Self::Forward,
            WinitButton::Other(v) => Self::Other(v),
        }
    }
}

impl From<PhysicalKey> for Key {
    fn from(pk: PhysicalKey) -> Self {
        let code = match pk {
            PhysicalKey::Code(code) => code,
            PhysicalKey::Unidentified(_) => return Key::Unknown(0),
        };
        match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Space => Key::Space,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
            KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,
            other => Key::Unknown(other as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_scaled_to_logical() {
        assert_eq!(logical(2.0, PhysicalPosition::new(200.0, 50.0)), (100.0, 25.0));
        assert_eq!(
            wheel_delta(2.0, MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0))),
            MouseWheelDelta::Pixel { x: 0.0, y: 40.0 }
        );
    }

    #[test]
    fn both_sides_of_a_modifier_map_together() {
        assert_eq!(Key::from(PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
        assert_eq!(Key::from(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert!(matches!(Key::from(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
    }
}
