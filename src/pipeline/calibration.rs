//! Zero-rate calibration from a still-sensor sampling window.
//!
//! The gyro's "turn-on" zero-rate level is estimated as the per-axis mean
//! over a stationary window; the largest raw value seen per axis becomes a
//! noise limit below which later readings are clamped to zero. Calibration
//! is best-effort: a noisy window still produces a profile, only a warning
//! is logged.

use std::thread;
use std::time::Duration;

use crate::core::types::AXES;
use crate::error::Result;
use crate::sensor::driver::GyroDriver;

/// Raw-digit noise limit above which a calibration window is reported as
/// suspicious (the device was probably moving).
const NOISY_WINDOW_LIMIT: i16 = 1500;

/// Per-axis calibration state, established once per capture cycle.
///
/// Replaced atomically from the consumer's point of view: a profile is
/// built up locally and only returned complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationProfile {
    /// Zero-rate offset per axis (mean raw reading while stationary).
    pub zero_rate: [i16; AXES],
    /// Noise limit per axis (maximum raw value observed in the window,
    /// signed; readings with smaller magnitude are treated as jitter).
    pub noise_limit: [i16; AXES],
}

/// Calibration sampling parameters.
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Number of raw readings to draw from the stationary sensor.
    pub window_size: usize,
    /// Delay between consecutive readings.
    pub sample_period: Duration,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            window_size: 128,
            sample_period: Duration::from_millis(10),
        }
    }
}

/// Draws a stationary sampling window and produces a [`CalibrationProfile`].
#[derive(Debug, Clone)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Run one calibration window against the sensor.
    ///
    /// The device is expected to be stationary for the duration. Transport
    /// failures abort; outliers do not.
    pub fn calibrate(&self, driver: &mut dyn GyroDriver) -> Result<CalibrationProfile> {
        let window = self.config.window_size.max(1);
        let mut sums = [0i32; AXES];
        // Running maxima start at zero: an all-negative window yields no
        // clamp threshold on that axis.
        let mut maxima = [0i16; AXES];

        log::debug!("calibrating over {} samples", window);
        for _ in 0..window {
            let raw = driver.read_raw()?;
            for axis in 0..AXES {
                sums[axis] += raw[axis] as i32;
                maxima[axis] = maxima[axis].max(raw[axis]);
            }
            if !self.config.sample_period.is_zero() {
                thread::sleep(self.config.sample_period);
            }
        }

        let zero_rate = if window.is_power_of_two() {
            let shift = window.trailing_zeros();
            [
                (sums[0] >> shift) as i16,
                (sums[1] >> shift) as i16,
                (sums[2] >> shift) as i16,
            ]
        } else {
            [
                (sums[0] / window as i32) as i16,
                (sums[1] / window as i32) as i16,
                (sums[2] / window as i32) as i16,
            ]
        };

        for (axis, &limit) in maxima.iter().enumerate() {
            if limit.unsigned_abs() > NOISY_WINDOW_LIMIT as u16 {
                log::warn!(
                    "calibration window looks noisy on axis {} (limit {}): was the device moving?",
                    axis,
                    limit
                );
            }
        }

        let profile = CalibrationProfile {
            zero_rate,
            noise_limit: maxima,
        };
        log::debug!(
            "calibration done: zero_rate={:?} noise_limit={:?}",
            profile.zero_rate,
            profile.noise_limit
        );
        Ok(profile)
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(CalibrationConfig::default())
    }
}
