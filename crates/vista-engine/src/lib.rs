//! Runtime under the vista viewer.
//!
//! [`window::Runtime`] opens a single winit window, creates the [`device::Gpu`]
//! for it and drives an [`core::App`] once per redraw. Apps get translated
//! [`input`], [`time`] and one command encoder per frame; the [`draw`] and
//! [`render`] modules paint the 2D overlay on top of whatever the app drew.

pub mod coords;
pub mod core;
pub mod device;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod time;
pub mod window;
