//! Hardware abstraction for the angular-rate sensor.
//!
//! The register-level transport (SPI writes to control registers, burst
//! reads of the output registers) lives behind [`driver::GyroDriver`]; the
//! rest of the crate only ever sees configured full-scale/ODR settings and
//! raw tri-axis readings.

pub mod driver;
pub mod mock;

pub use driver::{FullScale, GyroDriver, OutputDataRate};
pub use mock::{MockGyro, MockGyroConfig, MotionScript};
