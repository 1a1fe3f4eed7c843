//! Pure signal processing: calibration, unit conversion, trimming, and
//! similarity computation.
//!
//! Nothing in this layer touches hardware, storage, or the UI; every
//! function is deterministic given its inputs, which keeps the whole
//! matching pipeline unit-testable without a sensor.

pub mod calibration;
pub mod convert;
pub mod correlation;
pub mod dtw;
pub mod trim;

pub use calibration::{CalibrationConfig, CalibrationProfile, Calibrator};
pub use convert::{DistanceConfig, SampleConverter, DEGREE_TO_RAD};
pub use correlation::{correlate_axes, pearson, MatchPolicy};
pub use dtw::dtw_distance;
pub use trim::trim_idle;
