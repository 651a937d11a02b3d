use vista_engine::coords::Vec2;
use vista_engine::input::{InputFrame, InputState, MouseButton};

/// Pointer snapshot the GUI needs for one frame (logical pixels).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UiInput {
    pub pointer: Option<Vec2>,
    /// Primary button held.
    pub down: bool,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button went up this frame.
    pub released: bool,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            pointer: state.pointer_pos.map(Vec2::from),
            down: state.button_down(MouseButton::Left),
            pressed: frame.button_pressed(MouseButton::Left),
            released: frame.button_released(MouseButton::Left),
        }
    }

    #[inline]
    pub fn hovering(&self, rect: vista_engine::coords::Rect) -> bool {
        self.pointer.is_some_and(|p| rect.contains(p))
    }
}
