//! Font loading and measurement for the overlay.

mod font_system;
mod system;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use system::{load_system_font, SYSTEM_FONT_CANDIDATES};
