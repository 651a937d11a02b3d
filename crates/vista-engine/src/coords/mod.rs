//! Coordinate and geometry types shared across renderers, UI and viewer.
//!
//! Two spaces are in use:
//! - logical pixels (DPI-aware, top-left origin, +Y down) for the 2D overlay
//! - physical surface pixels for 3D viewports and GPU viewport/scissor state

mod canvas;
mod rect;
mod viewport_rect;

/// 2D vector in logical pixels.
pub use glam::Vec2;

pub use canvas::CanvasSize;
pub use rect::Rect;
pub use viewport_rect::ViewportRect;
