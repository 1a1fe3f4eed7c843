//! Mock gyroscope for hardware-free testing.
//!
//! Serves scripted raw readings with a configurable zero-rate bias and
//! Gaussian noise, and paces data-ready events at the configured ODR from
//! a background ticker thread (standing in for the INT2/DRDY line). Reads
//! can be made to fail after N samples for sensor-error path tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::core::types::RawTriple;
use crate::error::{Error, Result};
use crate::sensor::driver::{FullScale, GyroDriver, OutputDataRate};

/// A scripted sequence of raw motion readings.
///
/// Readings are served in order, one per `read_raw` call; past the end of
/// the script the sensor reads as stationary (all zeros). Bias and noise
/// are applied on top by the mock, so a script describes motion only.
#[derive(Debug, Clone, Default)]
pub struct MotionScript {
    readings: Vec<RawTriple>,
}

impl MotionScript {
    /// A script that never moves.
    pub fn stationary() -> Self {
        Self::default()
    }

    /// A script from explicit raw readings.
    pub fn new(readings: Vec<RawTriple>) -> Self {
        Self { readings }
    }

    /// Append `len` stationary readings.
    pub fn hold(mut self, len: usize) -> Self {
        self.readings.extend(std::iter::repeat([0i16; 3]).take(len));
        self
    }

    /// Append explicit motion readings.
    pub fn then(mut self, readings: &[RawTriple]) -> Self {
        self.readings.extend_from_slice(readings);
        self
    }

    fn reading(&self, index: usize) -> RawTriple {
        self.readings.get(index).copied().unwrap_or([0; 3])
    }
}

/// Mock gyroscope configuration.
#[derive(Debug, Clone)]
pub struct MockGyroConfig {
    /// RNG seed; 0 means entropy-seeded (non-deterministic).
    pub seed: u64,
    /// Per-axis zero-rate bias in raw digits (the "turn-on" offset a real
    /// part exhibits).
    pub bias: [i16; 3],
    /// Gaussian noise standard deviation in raw digits.
    pub noise_stddev: f32,
    /// Fail every `read_raw` from this read count onward (fault injection).
    pub fail_after_reads: Option<usize>,
}

impl Default for MockGyroConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bias: [0; 3],
            noise_stddev: 0.0,
            fail_after_reads: None,
        }
    }
}

/// Mock gyroscope driver.
pub struct MockGyro {
    config: MockGyroConfig,
    script: MotionScript,
    rng: SmallRng,
    sensitivity: f32,
    reads: usize,
    ready_rx: Option<Receiver<()>>,
    ticker: Option<JoinHandle<()>>,
    ticking: Arc<AtomicBool>,
}

impl MockGyro {
    /// Create a mock gyro serving the given script.
    pub fn new(config: MockGyroConfig, script: MotionScript) -> Self {
        let rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        Self {
            config,
            script,
            rng,
            sensitivity: 0.0,
            reads: 0,
            ready_rx: None,
            ticker: None,
            ticking: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of raw reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    fn noise(&mut self) -> f32 {
        if self.config.noise_stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = StandardNormal.sample(&mut self.rng);
        n * self.config.noise_stddev
    }

    fn stop_ticker(&mut self) {
        self.ticking.store(false, Ordering::Relaxed);
        self.ready_rx = None;
        if let Some(handle) = self.ticker.take() {
            let _ = handle.join();
        }
    }
}

impl GyroDriver for MockGyro {
    fn configure(&mut self, full_scale: FullScale, odr: OutputDataRate) -> Result<()> {
        self.sensitivity = full_scale.sensitivity();
        self.stop_ticker();

        // Single-slot data-ready handoff: the ticker drops a tick when the
        // consumer has not drained the previous one, matching a latched
        // interrupt line.
        let (tx, rx) = bounded::<()>(1);
        let period = odr.period();
        let ticking = Arc::new(AtomicBool::new(true));
        let ticker_flag = Arc::clone(&ticking);
        let handle = thread::Builder::new()
            .name("mock-gyro-drdy".into())
            .spawn(move || {
                while ticker_flag.load(Ordering::Relaxed) {
                    thread::sleep(period);
                    let _ = tx.try_send(());
                }
            })
            .map_err(|e| Error::Sensor(format!("failed to spawn DRDY ticker: {}", e)))?;

        self.ticking = ticking;
        self.ready_rx = Some(rx);
        self.ticker = Some(handle);
        Ok(())
    }

    fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    fn wait_data_ready(&mut self, timeout: Duration) -> bool {
        match &self.ready_rx {
            Some(rx) => rx.recv_timeout(timeout).is_ok(),
            None => false,
        }
    }

    fn read_raw(&mut self) -> Result<RawTriple> {
        if let Some(limit) = self.config.fail_after_reads {
            if self.reads >= limit {
                return Err(Error::Sensor("mock transport failure".into()));
            }
        }

        let motion = self.script.reading(self.reads);
        self.reads += 1;

        let mut raw = [0i16; 3];
        for axis in 0..3 {
            let value =
                motion[axis] as f32 + self.config.bias[axis] as f32 + self.noise();
            raw[axis] = value.clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        }
        Ok(raw)
    }

    fn power_off(&mut self) {
        self.stop_ticker();
        self.sensitivity = 0.0;
    }
}

impl Drop for MockGyro {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
