//! Input subsystem.
//!
//! Public API is platform-agnostic. The window runtime translates winit events
//! into [`InputEvent`]s via `platform::winit` and applies them to the window's
//! [`InputState`], recording per-frame transitions in an [`InputFrame`].
//!
//! Pointer coordinates are logical pixels.

mod frame;
mod state;
mod types;

pub mod platform;

pub use frame::{Edge, InputFrame};
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent, PointerMoveEvent,
};
