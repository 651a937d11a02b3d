//! The shared GPU: one device, one queue and the window's surface.
//!
//! Scenes and the overlay create their own resources from [`Gpu::device`].
//! Device loss and uncaptured validation errors are not tied to any call, so
//! they are queued as [`GpuEvent`]s for the app to drain each frame.

mod error;
mod events;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use events::GpuEvent;
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
