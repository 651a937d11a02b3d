use super::types::{InputEvent, Key, MouseButton};

/// A press or release that changed held input state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Edge {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
}

/// Input gathered between two redraws. The runtime clears it after every
/// frame callback.
#[derive(Debug, Default)]
pub struct InputFrame {
    events: Vec<InputEvent>,
    edges: Vec<Edge>,
}

impl InputFrame {
    /// Events in arrival order, including repeats and presses of keys that
    /// were already held.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// State changes in arrival order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.edges.contains(&Edge::KeyDown(key))
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.edges.contains(&Edge::ButtonDown(button))
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        self.edges.contains(&Edge::ButtonUp(button))
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.edges.clear();
    }

    pub(crate) fn record_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub(crate) fn record_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}
