//! MudraLock - gesture-password daemon for a 3-axis angular-rate sensor
//!
//! A hand motion captured from a gyroscope is recorded as a reference
//! gesture; later attempts are captured the same way and compared against
//! it to decide unlock/deny.
//!
//! # Architecture
//!
//! The crate is organized into 4 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   session/                          │  ← Capture/match state machine
//! │        (event latch, recorder, capture thread)      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   pipeline/                         │  ← Pure signal processing
//! │    (calibration, convert, trim, correlation, dtw)   │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    sensor/                          │  ← Hardware abstraction
//! │               (driver trait, mock)                  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation types
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in `pipeline/` is pure and deterministic given its inputs;
//! `session/` is the only layer with side effects (sensor reads, storage,
//! status reporting).

pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod sensor;
pub mod session;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use config::AppConfig;
pub use core::types::{Gesture, MatchDecision, MatchOutcome, RawTriple, Sample};
pub use error::{Error, Result};
pub use pipeline::calibration::{CalibrationProfile, Calibrator};
pub use pipeline::convert::SampleConverter;
pub use pipeline::correlation::{correlate_axes, pearson, MatchPolicy};
pub use pipeline::dtw::dtw_distance;
pub use pipeline::trim::trim_idle;
pub use sensor::driver::{FullScale, GyroDriver, OutputDataRate};
pub use sensor::mock::{MockGyro, MockGyroConfig, MotionScript};
pub use session::events::{EventLatch, PendingRequests, UserRequest};
pub use session::machine::{CaptureSession, Purpose, SessionConfig, SessionState};
pub use session::task::CaptureThread;
pub use storage::{FileGestureStore, GestureStore};
pub use ui::{ConsoleUi, StatusSink};
