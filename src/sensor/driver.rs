//! Gyroscope driver trait and sensor configuration types.

use std::time::Duration;

use crate::core::types::RawTriple;
use crate::error::Result;

/// Full-scale range selection.
///
/// Determines both the measurable range and the sensitivity constant used
/// to convert raw digits to degrees/second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullScale {
    /// ±245 dps
    Dps245,
    /// ±500 dps
    Dps500,
    /// ±2000 dps
    Dps2000,
}

impl FullScale {
    /// Sensitivity in degrees/second per raw digit for this range.
    pub const fn sensitivity(self) -> f32 {
        match self {
            FullScale::Dps245 => 0.00875,
            FullScale::Dps500 => 0.0175,
            FullScale::Dps2000 => 0.07,
        }
    }

    /// Parse from a dps value as it appears in configuration files.
    pub fn from_dps(dps: u16) -> Result<Self> {
        match dps {
            245 => Ok(FullScale::Dps245),
            500 => Ok(FullScale::Dps500),
            2000 => Ok(FullScale::Dps2000),
            other => Err(crate::Error::Config(format!(
                "unsupported full scale: {} dps (expected 245, 500, or 2000)",
                other
            ))),
        }
    }
}

/// Output data rate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDataRate {
    Hz100,
    Hz200,
    Hz400,
    Hz800,
}

impl OutputDataRate {
    /// Rate in Hz.
    pub const fn hz(self) -> u16 {
        match self {
            OutputDataRate::Hz100 => 100,
            OutputDataRate::Hz200 => 200,
            OutputDataRate::Hz400 => 400,
            OutputDataRate::Hz800 => 800,
        }
    }

    /// Time between consecutive data-ready events.
    pub fn period(self) -> Duration {
        Duration::from_micros(1_000_000 / self.hz() as u64)
    }

    /// Parse from an Hz value as it appears in configuration files.
    pub fn from_hz(hz: u16) -> Result<Self> {
        match hz {
            100 => Ok(OutputDataRate::Hz100),
            200 => Ok(OutputDataRate::Hz200),
            400 => Ok(OutputDataRate::Hz400),
            800 => Ok(OutputDataRate::Hz800),
            other => Err(crate::Error::Config(format!(
                "unsupported output data rate: {} Hz (expected 100, 200, 400, or 800)",
                other
            ))),
        }
    }
}

/// Gyroscope driver trait for hardware abstraction.
///
/// Implementations own the transport (SPI, simulation) and the data-ready
/// signalling. `configure` must be called before anything else; conversion
/// code obtains the sensitivity constant from the driver so raw readings
/// are never interpreted under a stale full-scale setting.
pub trait GyroDriver: Send {
    /// Configure full scale and output data rate, powering the device on.
    fn configure(&mut self, full_scale: FullScale, odr: OutputDataRate) -> Result<()>;

    /// Sensitivity constant for the configured full scale (dps/digit).
    fn sensitivity(&self) -> f32;

    /// Block until the next data-ready event, or until `timeout` elapses.
    ///
    /// Returns `false` on timeout; the caller skips that iteration's read.
    fn wait_data_ready(&mut self, timeout: Duration) -> bool;

    /// Read the latest raw tri-axis reading.
    fn read_raw(&mut self) -> Result<RawTriple>;

    /// Power the device down.
    fn power_off(&mut self);
}
