//! Fixed-window gesture recording.

use std::thread;
use std::time::{Duration, Instant};

use crate::core::types::Gesture;
use crate::error::Result;
use crate::pipeline::convert::SampleConverter;
use crate::sensor::driver::GyroDriver;

/// Capture window parameters.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Wall-clock length of the capture window.
    pub duration: Duration,
    /// Target interval between appended samples.
    pub sample_interval: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            sample_interval: Duration::from_millis(50),
        }
    }
}

/// Records one gesture over a fixed wall-clock window.
#[derive(Debug, Clone, Default)]
pub struct GestureRecorder {
    config: RecorderConfig,
}

impl GestureRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self { config }
    }

    /// Capture samples until the window elapses.
    ///
    /// Each iteration waits for the sensor's data-ready signal (up to one
    /// sample interval), converts the reading, and appends it. A missed
    /// data-ready stalls only that iteration's append; the window itself
    /// is wall-clock and neither extends nor shrinks. Transport failures
    /// abort the whole capture.
    pub fn record(
        &self,
        driver: &mut dyn GyroDriver,
        converter: &SampleConverter,
    ) -> Result<Gesture> {
        let deadline = Instant::now() + self.config.duration;
        let mut gesture = Gesture::new();

        while Instant::now() < deadline {
            if driver.wait_data_ready(self.config.sample_interval) {
                let raw = driver.read_raw()?;
                gesture.push(converter.to_dps(raw));
            } else {
                log::debug!("data-ready missed, skipping one sample slot");
            }
            thread::sleep(self.config.sample_interval);
        }

        log::debug!(
            "capture window closed: {} samples in {:?}",
            gesture.len(),
            self.config.duration
        );
        Ok(gesture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::calibration::CalibrationProfile;
    use crate::sensor::driver::{FullScale, OutputDataRate};
    use crate::sensor::mock::{MockGyro, MockGyroConfig, MotionScript};

    fn identity_converter() -> SampleConverter {
        SampleConverter::new(
            CalibrationProfile {
                zero_rate: [0; 3],
                noise_limit: [0; 3],
            },
            1.0,
        )
    }

    fn fast_recorder() -> GestureRecorder {
        GestureRecorder::new(RecorderConfig {
            duration: Duration::from_millis(200),
            sample_interval: Duration::from_millis(10),
        })
    }

    #[test]
    fn test_records_scripted_motion() {
        let script = MotionScript::new(vec![[100, 0, 0]; 64]);
        let mut gyro = MockGyro::new(MockGyroConfig::default(), script);
        gyro.configure(FullScale::Dps500, OutputDataRate::Hz800)
            .unwrap();

        let gesture = fast_recorder()
            .record(&mut gyro, &identity_converter())
            .unwrap();

        assert!(!gesture.is_empty());
        // ~200ms window at 10ms pacing: bounded above by 21 iterations
        assert!(gesture.len() <= 21, "got {} samples", gesture.len());
        assert_eq!(gesture.samples()[0], [100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_window_is_wall_clock_even_with_no_data_ready() {
        // Never configured: wait_data_ready always times out
        let mut gyro = MockGyro::new(MockGyroConfig::default(), MotionScript::stationary());

        let start = Instant::now();
        let gesture = fast_recorder()
            .record(&mut gyro, &identity_converter())
            .unwrap();
        let elapsed = start.elapsed();

        assert!(gesture.is_empty());
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(600));
    }

    #[test]
    fn test_transport_failure_aborts_capture() {
        let config = MockGyroConfig {
            fail_after_reads: Some(0),
            ..Default::default()
        };
        let mut gyro = MockGyro::new(config, MotionScript::stationary());
        gyro.configure(FullScale::Dps500, OutputDataRate::Hz800)
            .unwrap();

        assert!(fast_recorder()
            .record(&mut gyro, &identity_converter())
            .is_err());
    }
}
