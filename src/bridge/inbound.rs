//! Inbound signal marshaling.
//!
//! The rendering surface runs on its own execution context and may signal
//! readiness or failure at any time. Signals are queued through an mpsc
//! channel and only applied when the host drains them on its single control
//! context; gate and bridge state are never mutated from the surface's
//! context.

use std::sync::mpsc::{Receiver, Sender, channel};

use tracing::trace;

/// A signal sent by the rendering surface back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSignal {
    /// The surface finished loading and can accept commands. Idempotent:
    /// only the first signal has effect.
    Ready,
    /// The surface failed, either while loading or while rendering a chart.
    Error(String),
}

/// Clonable producer handed to the surface's execution context.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    sender: Sender<SurfaceSignal>,
}

impl SurfaceHandle {
    pub fn notify_ready(&self) {
        trace!("surface signaled ready");
        // A closed inbox means the host pipeline is gone; nothing to do.
        let _ = self.sender.send(SurfaceSignal::Ready);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        let message = message.into();
        trace!(message = %message, "surface signaled error");
        let _ = self.sender.send(SurfaceSignal::Error(message));
    }
}

/// Host-side end of the inbound channel. Drained only on the host control
/// context.
#[derive(Debug)]
pub struct SurfaceInbox {
    receiver: Receiver<SurfaceSignal>,
}

impl SurfaceInbox {
    #[must_use]
    pub fn new() -> (SurfaceHandle, Self) {
        let (sender, receiver) = channel();
        (SurfaceHandle { sender }, Self { receiver })
    }

    /// Takes every queued signal without blocking.
    pub fn drain(&self) -> Vec<SurfaceSignal> {
        self.receiver.try_iter().collect()
    }
}
