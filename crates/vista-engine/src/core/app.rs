use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::{FrameCtx, SetupCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// Call order: `on_init` once after the GPU exists, then any mix of
/// `on_window_event` / `on_resize` / `on_frame`. The app is dropped before the
/// window and GPU.
pub trait App {
    /// Creates GPU-side state. An error aborts startup and is returned from
    /// `Runtime::run`.
    fn on_init(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Raw window events, before the runtime handles resize/redraw.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called after the surface was reconfigured for a new size.
    fn on_resize(&mut self, ctx: &mut SetupCtx<'_, '_>) {
        let _ = ctx;
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
