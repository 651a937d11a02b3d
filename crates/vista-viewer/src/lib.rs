//! Multi-viewport mesh viewer.
//!
//! Each [`scene::Scene`] renders one mesh with its own orbit camera into a
//! column of the window; a GUI sidebar on the left shows camera state and
//! edits lighting. Scenes share the device and the surface, and draw in a
//! fixed order into one command encoder: the first clears the surface, the
//! rest load it.

pub mod app;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod gpu;
pub mod layout;
pub mod scene;
pub mod sidebar;

pub use app::{run, ViewerApp};
pub use config::{MeshSource, SceneDesc, ViewerConfig};
