//! Overlay draw stream.
//!
//! Widgets record [`DrawCmd`]s into a [`DrawList`]; the overlay renderers read
//! them back grouped by [`Layer`], keeping recording order inside a layer.

mod cmd;
mod list;

pub use cmd::{DrawCmd, FilledRect, Layer, TextRun};
pub use list::{DrawItem, DrawList};
