//! Orbit camera: state, drag bookkeeping and the controller that ties them to
//! pointer input.

mod controller;
mod drag;
mod state;

pub use controller::CameraController;
pub use drag::{mouse_space, DragState, INERTIA_EPSILON};
pub use state::{CameraState, PITCH_EPSILON, PITCH_LIMIT, ZOOM_MAX, ZOOM_MIN};
