//! Window + runtime loop.
//!
//! Owns the winit event loop and the single application window, and wires
//! them to the GPU layer and the `core::App` contract.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
