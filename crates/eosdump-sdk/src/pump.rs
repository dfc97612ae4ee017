//! Background event pump.
//!
//! The SDK only makes progress — including delivering completion callbacks —
//! while its tick entry point is driven. A dedicated thread ticks the
//! platform at a fixed interval for the whole operational lifetime of the
//! process: started once after platform creation, stopped and joined only at
//! shutdown. The pump holds no business state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::SdkError;
use crate::ffi::HPlatform;
use crate::ffi::functions::PlatformTickFn;

/// Interval between pump iterations.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The bound tick entry point plus the platform it drives.
pub struct TickHandle {
    pub(crate) tick: PlatformTickFn,
    pub(crate) platform: HPlatform,
}

// SAFETY: the platform handle is a process-global object and the tick entry
// point is the SDK's designated pump call; the pump thread is its only
// caller for the handle's lifetime.
unsafe impl Send for TickHandle {}

/// The background tick thread.
pub struct TickPump {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TickPump {
    /// Spawn the pump thread.
    pub fn start(handle: TickHandle) -> Result<Self, SdkError> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let thread = std::thread::Builder::new()
            .name("eos-tick".into())
            .spawn(move || {
                // Bind the whole handle so the closure captures `TickHandle`
                // (which is `Send`) rather than its individual non-`Send`
                // fields under edition 2024 disjoint capture.
                let handle = handle;
                tracing::trace!("tick pump started");
                while flag.load(Ordering::Relaxed) {
                    // SAFETY: the handle stays valid until process exit; the
                    // module is never unloaded.
                    unsafe { (handle.tick)(handle.platform) };
                    std::thread::sleep(TICK_INTERVAL);
                }
                tracing::trace!("tick pump stopped");
            })
            .map_err(SdkError::TickThread)?;

        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    /// Signal the pump to stop and join it. Does not cancel operations still
    /// pending in the native layer.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for TickPump {
    fn drop(&mut self) {
        self.stop();
    }
}
