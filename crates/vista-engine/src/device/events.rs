use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Asynchronous failure reported by the device outside any call site.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuEvent {
    /// The device is gone; nothing created from it is usable any more.
    DeviceLost { reason: String, message: String },
    /// A validation or out-of-memory error nobody captured.
    Error(String),
}

/// Routes the device's lost and uncaptured-error callbacks into a channel.
pub(super) fn install(device: &wgpu::Device) -> Receiver<GpuEvent> {
    let (tx, rx) = mpsc::channel();

    let lost_tx: Sender<GpuEvent> = tx.clone();
    device.set_device_lost_callback(move |reason, message| {
        // The receiver may already be gone during teardown.
        let _ = lost_tx.send(GpuEvent::DeviceLost {
            reason: format!("{reason:?}"),
            message,
        });
    });

    device.on_uncaptured_error(Arc::new(move |error: wgpu::Error| {
        let _ = tx.send(GpuEvent::Error(error.to_string()));
    }));

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_lost_is_distinguishable_from_errors() {
        let lost = GpuEvent::DeviceLost { reason: "Unknown".into(), message: "gone".into() };
        assert!(matches!(lost, GpuEvent::DeviceLost { .. }));
        assert_ne!(lost, GpuEvent::Error("gone".into()));
    }
}
