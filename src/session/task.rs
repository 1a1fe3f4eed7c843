//! Capture thread lifecycle.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::session::machine::CaptureSession;

/// Owns the background thread running a [`CaptureSession`].
pub struct CaptureThread {
    handle: Option<JoinHandle<()>>,
}

impl CaptureThread {
    /// Spawn the capture thread.
    ///
    /// The session serves requests until shutdown is raised on its latch
    /// and `running` clears.
    pub fn spawn(mut session: CaptureSession, running: Arc<AtomicBool>) -> Result<Self> {
        let handle = thread::Builder::new()
            .name("capture".into())
            .spawn(move || session.run(&running))
            .map_err(|e| Error::Sensor(format!("failed to spawn capture thread: {}", e)))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Wait for the capture thread to exit.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("capture thread panicked");
            }
        }
    }
}
