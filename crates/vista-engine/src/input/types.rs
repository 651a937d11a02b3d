/// Physical key. Keys the viewer has no use for arrive as `Unknown` carrying
/// the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
    Control,
    Alt,
    Meta,
    Unknown(u32),
}

impl Key {
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys held at the time of an event.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Wheel movement. Notched wheels report whole `Line`s; touchpads report
/// logical `Pixel`s.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// How many logical pixels of touchpad scroll count as one notch.
    pub const PIXELS_PER_LINE: f32 = 40.0;

    /// Vertical movement in notches. Positive means scrolling up, away from
    /// the user, which the viewer maps to zooming in.
    pub fn lines_y(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / Self::PIXELS_PER_LINE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Button press or release. Position is where the pointer was last seen,
/// in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Window input after translation from the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),
    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),
    /// Wheel movement over the point `(x, y)`.
    MouseWheel {
        delta: MouseWheelDelta,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },
    PointerLeft,
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touchpad_pixels_become_notches() {
        assert_eq!(MouseWheelDelta::Pixel { x: 0.0, y: 80.0 }.lines_y(), 2.0);
        assert_eq!(MouseWheelDelta::Pixel { x: 0.0, y: -20.0 }.lines_y(), -0.5);
        assert_eq!(MouseWheelDelta::Line { x: 3.0, y: -1.0 }.lines_y(), -1.0);
    }

    #[test]
    fn modifier_keys_are_recognised() {
        assert!(Key::Shift.is_modifier());
        assert!(!Key::Escape.is_modifier());
        assert!(!Key::Unknown(7).is_modifier());
    }
}
