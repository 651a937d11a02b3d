//! 2D overlay renderers.
//!
//! Renderers consume a `draw::DrawList` and encode their own passes. Geometry
//! arrives in logical pixels and is scaled to physical pixels on the CPU, so the
//! shaders only see surface-space coordinates.
//!
//! Every overlay pass loads the existing target contents; nothing here clears.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
