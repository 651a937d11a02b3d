use std::collections::HashSet;

use super::frame::{Edge, InputFrame};
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// What is currently held or hovered in the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical pixels; `None` once the pointer leaves the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state. Presses of something already held and
    /// releases of something not held are kept as events but produce no
    /// [`Edge`].
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        if let Some(edge) = self.update(&ev) {
            frame.record_edge(edge);
        }
        frame.record_event(ev);
    }

    fn update(&mut self, ev: &InputEvent) -> Option<Edge> {
        match *ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = m,
            InputEvent::Focused(focused) => {
                self.focused = focused;
                // An unfocused window never sees the matching releases.
                if !focused {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
            InputEvent::PointerMoved(p) => self.pointer_pos = Some((p.x, p.y)),
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::MouseWheel { modifiers, .. } => self.modifiers = modifiers,
            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = modifiers;
                return match state {
                    KeyState::Pressed => self.keys_down.insert(key).then_some(Edge::KeyDown(key)),
                    KeyState::Released => self.keys_down.remove(&key).then_some(Edge::KeyUp(key)),
                };
            }
            InputEvent::PointerButton(b) => {
                self.pointer_pos = Some((b.x, b.y));
                self.modifiers = b.modifiers;
                return match b.state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(b.button).then_some(Edge::ButtonDown(b.button))
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(&b.button).then_some(Edge::ButtonUp(b.button))
                    }
                };
            }
        }
        None
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
