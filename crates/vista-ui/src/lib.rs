//! Immediate-mode GUI overlay.
//!
//! Each frame the application describes its widgets through a [`Ui`]; widgets
//! return whether their value changed. The resulting draw list is rendered on
//! top of the 3D scenes by [`GuiOverlay::render`] in a pass that loads the
//! existing surface contents.
//!
//! ```rust,ignore
//! overlay.frame(UiInput::from_engine(ctx.input, ctx.input_frame), |ui| {
//!     ui.panel(sidebar, "Camera", |ui| {
//!         ui.label(format!("{:.2} ms", dt * 1000.0));
//!         ui.slider("zoom", &mut zoom, -2.0..=2.0);
//!     });
//! });
//! ```

mod input;
mod overlay;
mod painter;
mod style;
mod ui;

pub use input::UiInput;
pub use overlay::GuiOverlay;
pub use painter::Painter;
pub use style::Style;
pub use ui::{Ui, UiMemory, WidgetId};
