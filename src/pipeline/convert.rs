//! Raw-to-physical conversion.
//!
//! A [`SampleConverter`] binds a calibration profile to the sensitivity
//! constant of the active full-scale setting; recalibration (a new
//! converter) is required whenever the sensor configuration changes.

use crate::core::types::{RawTriple, Sample, AXES};
use crate::pipeline::calibration::CalibrationProfile;

/// Degrees to radians factor (rounded, kept for behavioral parity).
pub const DEGREE_TO_RAD: f32 = 0.0175;

/// Distance-integration parameters.
#[derive(Debug, Clone)]
pub struct DistanceConfig {
    /// Number of samples integrated.
    pub window: usize,
    /// Sampling interval in seconds.
    pub dt: f32,
    /// Arm-length/movement factor mapping angular to linear velocity.
    pub arm_factor: f32,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            window: 400,
            dt: 0.05,
            arm_factor: 1.0,
        }
    }
}

/// Converts raw tri-axis readings to physical units.
#[derive(Debug, Clone, Copy)]
pub struct SampleConverter {
    profile: CalibrationProfile,
    sensitivity: f32,
}

impl SampleConverter {
    /// Bind a calibration profile to a sensitivity constant (dps/digit).
    pub fn new(profile: CalibrationProfile, sensitivity: f32) -> Self {
        Self {
            profile,
            sensitivity,
        }
    }

    /// The active calibration profile.
    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// Convert one raw reading to degrees/second.
    ///
    /// Per axis: subtract the zero-rate offset, clamp to exactly zero when
    /// the corrected magnitude is below the noise limit's magnitude, then
    /// scale by sensitivity.
    pub fn to_dps(&self, raw: RawTriple) -> Sample {
        let mut sample = [0.0f32; AXES];
        for axis in 0..AXES {
            let corrected = raw[axis] as i32 - self.profile.zero_rate[axis] as i32;
            let limit = self.profile.noise_limit[axis].unsigned_abs() as i32;
            let clamped = if corrected.abs() < limit { 0 } else { corrected };
            sample[axis] = clamped as f32 * self.sensitivity;
        }
        sample
    }

    /// Map an angular rate to a linear-velocity proxy.
    pub fn to_velocity(&self, dps: f32, arm_factor: f32) -> f32 {
        dps * DEGREE_TO_RAD * arm_factor
    }

    /// Integrate `|velocity * dt|` over the first `config.window` samples of
    /// a single-axis dps series, yielding a scalar distance estimate.
    ///
    /// Utility only; the matching decision never consults it.
    pub fn integrate_distance(&self, axis_dps: &[f32], config: &DistanceConfig) -> f32 {
        axis_dps
            .iter()
            .take(config.window)
            .map(|&dps| (self.to_velocity(dps, config.arm_factor) * config.dt).abs())
            .sum()
    }
}
