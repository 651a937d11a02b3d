//! Paint model shared between the GUI overlay and the 2D renderers.
//!
//! Only solid colors exist; geometry types live in `coords`.

pub mod color;

pub use color::Color;
