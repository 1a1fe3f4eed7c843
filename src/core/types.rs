//! Core data types for samples, gestures, and match results.
//!
//! Key types:
//! - [`RawTriple`]: unconverted integer sensor reading on 3 axes
//! - [`Sample`]: one converted reading in degrees/second
//! - [`Gesture`]: an ordered capture of samples over time
//! - [`MatchDecision`] / [`MatchOutcome`]: what a verify cycle reports

use serde::{Deserialize, Serialize};

/// Number of spatial axes.
pub const AXES: usize = 3;

/// Unconverted tri-axis sensor reading, in raw sensor digits.
pub type RawTriple = [i16; 3];

/// One converted angular-rate reading `[x, y, z]`, degrees/second per axis.
pub type Sample = [f32; 3];

/// An ordered, time-indexed sequence of samples.
///
/// Insertion order is temporal order and is semantically meaningful: the
/// only permitted reordering is the contiguous shift done by trimming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    samples: Vec<Sample>,
}

impl Gesture {
    /// Create an empty gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gesture from captured samples (capture order preserved).
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples are present.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append one sample in capture order.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Discard all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// The samples in capture order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Replace the samples with a contiguous sub-slice `[start, end)`.
    ///
    /// Used by the trimmer; keeps relative order.
    pub fn retain_range(&mut self, start: usize, end: usize) {
        self.samples.truncate(end);
        self.samples.drain(..start);
    }

    /// Extract the 1-D series of one axis (`0..AXES`).
    pub fn axis_series(&self, axis: usize) -> Vec<f32> {
        self.samples.iter().map(|s| s[axis]).collect()
    }
}

/// Per-axis Pearson correlation coefficients `[x, y, z]`.
pub type CorrelationResult = [f32; AXES];

/// Outcome of comparing an attempt against the reference gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDecision {
    /// True when the attempt is accepted.
    pub accepted: bool,
    /// The per-axis correlations that produced the decision.
    pub correlation: CorrelationResult,
}

/// What a verify cycle reports to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Comparison ran; accept/reject with the correlations behind it.
    Decision(MatchDecision),
    /// No reference gesture is enrolled; the similarity engine never ran.
    NoReference,
    /// Comparison could not produce a numeric result (length mismatch).
    Indeterminate,
}

impl MatchOutcome {
    /// True only for an accepted decision.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            MatchOutcome::Decision(MatchDecision { accepted: true, .. })
        )
    }
}
