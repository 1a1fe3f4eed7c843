//! Capture/match state machine.
//!
//! One [`CaptureSession`] owns the sensor, the persisted reference gesture,
//! and the reporting sink. A cycle runs calibrate, countdown, record, trim,
//! then either enrolls the capture as the new reference or compares it
//! against the stored one. The reference survives failed cycles untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::core::types::{Gesture, MatchOutcome};
use crate::error::{Error, Result};
use crate::pipeline::calibration::{CalibrationConfig, Calibrator};
use crate::pipeline::convert::SampleConverter;
use crate::pipeline::correlation::MatchPolicy;
use crate::pipeline::trim::trim_idle;
use crate::sensor::driver::{FullScale, GyroDriver, OutputDataRate};
use crate::session::events::{EventLatch, PendingRequests};
use crate::session::recorder::{GestureRecorder, RecorderConfig};
use crate::storage::GestureStore;
use crate::ui::StatusSink;

/// What a capture cycle is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// The capture becomes the new reference gesture.
    Enroll,
    /// The capture is compared against the reference gesture.
    Verify,
}

/// Observable phase of the capture thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a user request.
    Idle,
    /// Request accepted, sensor being prepared.
    AwaitingCapture(Purpose),
    /// Capture window open.
    Recording,
    /// Trimming the captured gesture.
    PostProcessing,
    /// Enrolling or comparing.
    Deciding,
}

/// Everything a capture cycle needs to know.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub full_scale: FullScale,
    pub odr: OutputDataRate,
    pub calibration: CalibrationConfig,
    pub recorder: RecorderConfig,
    /// Countdown steps announced before the capture window opens.
    pub countdown_steps: u32,
    /// Delay between countdown announcements.
    pub countdown_step: Duration,
    /// Velocity magnitude below which a sample counts as idle.
    pub trim_threshold: f32,
    pub policy: MatchPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            full_scale: FullScale::Dps500,
            odr: OutputDataRate::Hz200,
            calibration: CalibrationConfig::default(),
            recorder: RecorderConfig::default(),
            countdown_steps: 3,
            countdown_step: Duration::from_secs(1),
            trim_threshold: 0.00001,
            policy: MatchPolicy::default(),
        }
    }
}

/// Owner of the sensor, the reference gesture, and the reporting sink.
pub struct CaptureSession {
    config: SessionConfig,
    driver: Box<dyn GyroDriver>,
    store: Box<dyn GestureStore>,
    sink: Box<dyn StatusSink>,
    latch: Arc<EventLatch>,
    reference: Gesture,
    state: SessionState,
}

impl CaptureSession {
    pub fn new(
        config: SessionConfig,
        driver: Box<dyn GyroDriver>,
        store: Box<dyn GestureStore>,
        sink: Box<dyn StatusSink>,
        latch: Arc<EventLatch>,
    ) -> Self {
        Self {
            config,
            driver,
            store,
            sink,
            latch,
            reference: Gesture::new(),
            state: SessionState::Idle,
        }
    }

    /// Current phase.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The enrolled reference gesture.
    pub fn reference(&self) -> &Gesture {
        &self.reference
    }

    /// Load the persisted reference, if any. Called once at startup.
    pub fn load_reference(&mut self) -> Result<()> {
        match self.store.load()? {
            Some(gesture) => {
                log::info!("loaded reference gesture ({} samples)", gesture.len());
                self.reference = gesture;
                self.sink.status("Locked.");
            }
            None => {
                self.sink.status("No gesture recorded.");
            }
        }
        Ok(())
    }

    /// Serve requests until shutdown is raised and `running` clears.
    pub fn run(&mut self, running: &AtomicBool) {
        log::info!("capture session started");
        while running.load(Ordering::Relaxed) {
            let pending = self.latch.wait();
            if pending.shutdown {
                break;
            }
            self.run_once(pending);
        }
        self.driver.power_off();
        log::info!("capture session stopped");
    }

    /// Handle one batch of pending requests.
    ///
    /// Erase is honored first; of record and unlock, record wins when both
    /// are pending, since an erase-then-record batch means the user wants a
    /// fresh enrollment.
    pub fn run_once(&mut self, pending: PendingRequests) {
        if pending.erase {
            self.erase_all();
        }
        if pending.record {
            self.cycle(Purpose::Enroll);
        } else if pending.unlock {
            self.cycle(Purpose::Verify);
        }
    }

    fn cycle(&mut self, purpose: Purpose) {
        self.state = SessionState::AwaitingCapture(purpose);

        let capture = match self.capture(purpose) {
            Ok(capture) => capture,
            Err(e) => {
                log::error!("capture cycle failed: {}", e);
                self.sink.status("Sensor error, try again.");
                self.state = SessionState::Idle;
                return;
            }
        };

        self.state = SessionState::Deciding;
        match purpose {
            Purpose::Enroll => self.enroll(capture),
            Purpose::Verify => self.verify(&capture),
        }
        self.state = SessionState::Idle;
    }

    /// Calibrate, count down, record, trim.
    fn capture(&mut self, purpose: Purpose) -> Result<Gesture> {
        self.sink.status("Calibrating...");
        self.driver.configure(self.config.full_scale, self.config.odr)?;
        let profile = Calibrator::new(self.config.calibration.clone())
            .calibrate(self.driver.as_mut())?;
        let converter = SampleConverter::new(profile, self.driver.sensitivity());

        for step in (1..=self.config.countdown_steps).rev() {
            self.sink.status(&format!("Recording in {}...", step));
            thread::sleep(self.config.countdown_step);
        }

        self.state = SessionState::Recording;
        self.sink.status(match purpose {
            Purpose::Enroll => "Recording gesture...",
            Purpose::Verify => "Recording attempt...",
        });
        let mut gesture = GestureRecorder::new(self.config.recorder.clone())
            .record(self.driver.as_mut(), &converter)?;

        self.state = SessionState::PostProcessing;
        trim_idle(&mut gesture, self.config.trim_threshold);
        self.sink.status("Finished recording.");
        log::debug!("trimmed capture: {} samples remain", gesture.len());
        Ok(gesture)
    }

    fn enroll(&mut self, capture: Gesture) {
        self.reference = capture;
        if let Err(e) = self.store.save(&self.reference) {
            log::warn!("could not persist reference gesture: {}", e);
        }
        self.sink.status("Gesture enrolled.");
        log::info!("enrolled reference gesture ({} samples)", self.reference.len());
    }

    fn verify(&mut self, attempt: &Gesture) {
        if self.reference.is_empty() {
            self.sink.decision(&MatchOutcome::NoReference);
            return;
        }

        match crate::pipeline::correlation::correlate_axes(&self.reference, attempt) {
            Ok(correlation) => {
                let decision = self.config.policy.decide(correlation);
                self.sink.decision(&MatchOutcome::Decision(decision));
            }
            Err(Error::LengthMismatch { reference, attempt }) => {
                log::warn!(
                    "length mismatch: reference {} samples, attempt {}",
                    reference,
                    attempt
                );
                self.sink.decision(&MatchOutcome::Indeterminate);
            }
            Err(e) => {
                log::error!("comparison failed: {}", e);
                self.sink.decision(&MatchOutcome::Indeterminate);
            }
        }
    }

    fn erase_all(&mut self) {
        self.sink.status("Erasing...");
        self.reference.clear();
        if let Err(e) = self.store.erase() {
            log::warn!("could not erase persisted gesture: {}", e);
        }
        self.sink.status("No gesture recorded.");
        log::info!("reference gesture erased");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RawTriple;
    use crate::sensor::mock::{MockGyro, MockGyroConfig, MotionScript};
    use crate::storage::MemoryGestureStore;
    use crate::ui::{MemorySink, MemorySinkRecord};
    use parking_lot::Mutex;

    // Calibration window plus a motion pattern strong enough to survive
    // trimming: one axis swings, the others stay quiet.
    fn scripted_gyro(motion: &[RawTriple]) -> MockGyro {
        let script = MotionScript::stationary().hold(8).then(motion);
        let mut gyro = MockGyro::new(MockGyroConfig::default(), script);
        gyro.configure(FullScale::Dps500, OutputDataRate::Hz800)
            .unwrap();
        gyro
    }

    fn fast_config() -> SessionConfig {
        SessionConfig {
            calibration: CalibrationConfig {
                window_size: 8,
                sample_period: Duration::ZERO,
            },
            recorder: RecorderConfig {
                duration: Duration::from_millis(120),
                sample_interval: Duration::from_millis(10),
            },
            countdown_steps: 0,
            countdown_step: Duration::ZERO,
            ..Default::default()
        }
    }

    fn session_with(
        motion: &[RawTriple],
    ) -> (CaptureSession, Arc<Mutex<MemorySinkRecord>>) {
        let sink = MemorySink::new();
        let record = sink.handle();
        let session = CaptureSession::new(
            fast_config(),
            Box::new(scripted_gyro(motion)),
            Box::new(MemoryGestureStore::new()),
            Box::new(sink),
            Arc::new(EventLatch::new()),
        );
        (session, record)
    }

    fn swing() -> Vec<RawTriple> {
        (0..64).map(|i| [(i % 16) as i16 * 400, 0, 0]).collect()
    }

    fn pending_record() -> PendingRequests {
        PendingRequests {
            record: true,
            ..Default::default()
        }
    }

    fn pending_unlock() -> PendingRequests {
        PendingRequests {
            unlock: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_enroll_sets_reference_and_persists() {
        let (mut session, record) = session_with(&swing());
        session.run_once(pending_record());

        assert!(!session.reference().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
        let statuses = record.lock().statuses.clone();
        assert!(statuses.iter().any(|s| s == "Gesture enrolled."));

        // Persisted copy matches the live reference
        let stored = session.store.load().unwrap().unwrap();
        assert_eq!(&stored, session.reference());
    }

    #[test]
    fn test_verify_without_reference_reports_no_reference() {
        let (mut session, record) = session_with(&swing());
        session.run_once(pending_unlock());

        assert_eq!(record.lock().outcomes, vec![MatchOutcome::NoReference]);
        assert!(session.reference().is_empty());
    }

    #[test]
    fn test_verify_single_axis_match_accepts() {
        let (mut session, record) = session_with(&[]);
        session.reference =
            Gesture::from_samples((0..8).map(|i| [i as f32, 0.0, 0.0]).collect());
        // Perfectly correlated on x, constant (coefficient 0) on y and z
        let attempt =
            Gesture::from_samples((0..8).map(|i| [(i * 2) as f32, 0.0, 0.0]).collect());

        session.verify(&attempt);

        let outcomes = record.lock().outcomes.clone();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_accepted());
    }

    #[test]
    fn test_verify_length_mismatch_is_indeterminate() {
        let (mut session, record) = session_with(&[]);
        session.reference = Gesture::from_samples(vec![[1.0, 0.0, 0.0]; 3]);
        let attempt = Gesture::from_samples(vec![[1.0, 0.0, 0.0]; 5]);

        session.verify(&attempt);

        let outcomes = record.lock().outcomes.clone();
        // A mismatched attempt is reported indeterminate and the reference
        // stays enrolled.
        assert_eq!(outcomes, vec![MatchOutcome::Indeterminate]);
        assert_eq!(session.reference().len(), 3);
    }

    #[test]
    fn test_erase_clears_reference_and_store() {
        let (mut session, record) = session_with(&swing());
        session.run_once(pending_record());
        assert!(!session.reference().is_empty());

        session.run_once(PendingRequests {
            erase: true,
            ..Default::default()
        });

        assert!(session.reference().is_empty());
        assert_eq!(session.store.load().unwrap(), None);
        let statuses = record.lock().statuses.clone();
        assert!(statuses.iter().any(|s| s == "No gesture recorded."));
    }

    #[test]
    fn test_sensor_failure_leaves_reference_untouched() {
        let existing = Gesture::from_samples(vec![[1.0, 2.0, 3.0]; 4]);

        let config = MockGyroConfig {
            fail_after_reads: Some(2),
            ..Default::default()
        };
        let mut gyro = MockGyro::new(config, MotionScript::stationary());
        gyro.configure(FullScale::Dps500, OutputDataRate::Hz800)
            .unwrap();

        let sink = MemorySink::new();
        let record = sink.handle();
        let mut session = CaptureSession::new(
            fast_config(),
            Box::new(gyro),
            Box::new(MemoryGestureStore::new()),
            Box::new(sink),
            Arc::new(EventLatch::new()),
        );
        session.reference = existing.clone();

        session.run_once(pending_record());

        assert_eq!(session.reference(), &existing);
        assert_eq!(session.state(), SessionState::Idle);
        let statuses = record.lock().statuses.clone();
        assert!(statuses.iter().any(|s| s == "Sensor error, try again."));
    }

    #[test]
    fn test_load_reference_reports_locked() {
        let mut store = MemoryGestureStore::new();
        store
            .save(&Gesture::from_samples(vec![[1.0, 0.0, 0.0]; 8]))
            .unwrap();

        let sink = MemorySink::new();
        let record = sink.handle();
        let mut session = CaptureSession::new(
            fast_config(),
            Box::new(MockGyro::new(
                MockGyroConfig::default(),
                MotionScript::stationary(),
            )),
            Box::new(store),
            Box::new(sink),
            Arc::new(EventLatch::new()),
        );

        session.load_reference().unwrap();
        assert_eq!(session.reference().len(), 8);
        assert_eq!(record.lock().statuses, vec!["Locked.".to_string()]);
    }

    #[test]
    fn test_countdown_statuses_in_order() {
        let mut config = fast_config();
        config.countdown_steps = 3;
        config.countdown_step = Duration::from_millis(1);

        let sink = MemorySink::new();
        let record = sink.handle();
        let mut session = CaptureSession::new(
            config,
            Box::new(scripted_gyro(&swing())),
            Box::new(MemoryGestureStore::new()),
            Box::new(sink),
            Arc::new(EventLatch::new()),
        );

        session.run_once(pending_record());

        let statuses = record.lock().statuses.clone();
        let countdown: Vec<&String> = statuses
            .iter()
            .filter(|s| s.starts_with("Recording in"))
            .collect();
        assert_eq!(
            countdown,
            vec!["Recording in 3...", "Recording in 2...", "Recording in 1..."]
        );
    }
}
