//! Application configuration.
//!
//! Loads configuration from a TOML file; every section falls back to the
//! historical device defaults so a missing file still runs.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pipeline::calibration::CalibrationConfig;
use crate::pipeline::convert::DistanceConfig;
use crate::pipeline::correlation::MatchPolicy;
use crate::sensor::driver::{FullScale, OutputDataRate};
use crate::session::machine::SessionConfig;
use crate::session::recorder::RecorderConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub sensor: SensorConfig,
    pub calibration: CalibrationSection,
    pub capture: CaptureConfig,
    pub matching: MatchingConfig,
    pub distance: DistanceSection,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Gyroscope configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Full-scale range in dps (245, 500, or 2000).
    pub full_scale_dps: u16,
    /// Output data rate in Hz (100, 200, 400, or 800).
    pub odr_hz: u16,
    /// Interval between appended samples during capture, in milliseconds.
    pub sample_interval_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            full_scale_dps: 500,
            odr_hz: 200,
            sample_interval_ms: 50,
        }
    }
}

/// Zero-rate calibration window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CalibrationSection {
    /// Stationary readings per calibration window.
    pub window_size: usize,
    /// Delay between calibration readings, in milliseconds.
    pub sample_period_ms: u64,
}

impl Default for CalibrationSection {
    fn default() -> Self {
        Self {
            window_size: 128,
            sample_period_ms: 10,
        }
    }
}

/// Capture window and countdown.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Capture window length in milliseconds.
    pub duration_ms: u64,
    /// Countdown steps announced before recording starts.
    pub countdown_steps: u32,
    /// Delay between countdown announcements, in milliseconds.
    pub countdown_step_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            countdown_steps: 3,
            countdown_step_ms: 1000,
        }
    }
}

/// Matching thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Per-axis correlation an attempt must exceed.
    pub correlation_limit: f32,
    /// Velocity magnitude below which a sample counts as idle.
    pub trim_threshold: f32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            correlation_limit: 0.1,
            trim_threshold: 0.00001,
        }
    }
}

/// Distance-estimate integration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DistanceSection {
    /// Samples integrated per estimate.
    pub window: usize,
    /// Sampling interval in seconds.
    pub dt: f32,
    /// Arm-length factor mapping angular to linear velocity.
    pub arm_factor: f32,
}

impl Default for DistanceSection {
    fn default() -> Self {
        Self {
            window: 400,
            dt: 0.05,
            arm_factor: 1.0,
        }
    }
}

/// Gesture persistence.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the enrolled-gesture file.
    pub gesture_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            gesture_path: "gesture.bin".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        FullScale::from_dps(self.sensor.full_scale_dps)?;
        OutputDataRate::from_hz(self.sensor.odr_hz)?;
        if self.calibration.window_size == 0 {
            return Err(Error::Config("calibration window_size must be > 0".into()));
        }
        if self.capture.duration_ms == 0 {
            return Err(Error::Config("capture duration_ms must be > 0".into()));
        }
        if self.sensor.sample_interval_ms == 0 {
            return Err(Error::Config("sensor sample_interval_ms must be > 0".into()));
        }
        if self.matching.trim_threshold < 0.0 {
            return Err(Error::Config("matching trim_threshold must be >= 0".into()));
        }
        Ok(())
    }

    /// Assemble the capture-session parameters.
    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig {
            full_scale: FullScale::from_dps(self.sensor.full_scale_dps)?,
            odr: OutputDataRate::from_hz(self.sensor.odr_hz)?,
            calibration: CalibrationConfig {
                window_size: self.calibration.window_size,
                sample_period: Duration::from_millis(self.calibration.sample_period_ms),
            },
            recorder: RecorderConfig {
                duration: Duration::from_millis(self.capture.duration_ms),
                sample_interval: Duration::from_millis(self.sensor.sample_interval_ms),
            },
            countdown_steps: self.capture.countdown_steps,
            countdown_step: Duration::from_millis(self.capture.countdown_step_ms),
            trim_threshold: self.matching.trim_threshold,
            policy: MatchPolicy::new(self.matching.correlation_limit),
        })
    }

    /// Assemble the distance-integration parameters.
    pub fn distance_config(&self) -> DistanceConfig {
        DistanceConfig {
            window: self.distance.window,
            dt: self.distance.dt,
            arm_factor: self.distance.arm_factor,
        }
    }
}
