//! Idle-region trimming of a captured gesture.
//!
//! Capture windows are fixed wall-clock length, so a gesture is padded on
//! both sides with near-zero samples from before and after the actual hand
//! motion. Trimming removes that padding so two captures of the same motion
//! with different idle lead-in stay comparable.

use crate::core::types::{Gesture, Sample};

/// Remove leading and trailing idle samples in place.
///
/// A sample is idle when all three axis magnitudes are at or below
/// `threshold`. The result is the contiguous slice from the first to the
/// last non-idle sample; an entirely idle gesture becomes empty. Single
/// forward and backward scans, no reordering. Idempotent.
pub fn trim_idle(gesture: &mut Gesture, threshold: f32) {
    let is_idle = |s: &Sample| s.iter().all(|v| v.abs() <= threshold);

    let bounds = {
        let samples = gesture.samples();
        match samples.iter().position(|s| !is_idle(s)) {
            Some(first) => samples.iter().rposition(|s| !is_idle(s)).map(|last| (first, last)),
            None => None,
        }
    };

    match bounds {
        // rposition found at least the sample position found, so first <= last
        Some((first, last)) => gesture.retain_range(first, last + 1),
        None => gesture.clear(),
    }
}
