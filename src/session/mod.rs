//! Event-driven capture/match coordination.
//!
//! The capture thread is the single owner of the reference and attempt
//! buffers; user requests reach it through a pending-flags latch and raw
//! samples through the driver's data-ready handoff.

pub mod events;
pub mod machine;
pub mod recorder;
pub mod task;

pub use events::{EventLatch, PendingRequests, UserRequest};
pub use machine::{CaptureSession, Purpose, SessionConfig, SessionState};
pub use recorder::{GestureRecorder, RecorderConfig};
pub use task::CaptureThread;
