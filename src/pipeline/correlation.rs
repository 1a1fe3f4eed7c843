//! Per-axis Pearson correlation and the accept/reject policy.
//!
//! This is the decision path of the similarity engine: the reference and
//! attempt gestures are split into three 1-D axis series, each pair is
//! correlated, and the [`MatchPolicy`] turns the three coefficients into an
//! accept/reject decision.

use crate::core::types::{CorrelationResult, Gesture, MatchDecision, AXES};
use crate::error::{Error, Result};

/// Pearson correlation coefficient between two equal-length series.
///
/// Lengths must match exactly; differing lengths are an explicit
/// [`Error::LengthMismatch`], never silently truncated or padded. A
/// zero-variance series (constant input, including empty series) yields a
/// defined coefficient of 0.0 rather than NaN, keeping the decision rule
/// total.
pub fn pearson(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            reference: a.len(),
            attempt: b.len(),
        });
    }

    let n = a.len() as f64;
    let mut sum_a = 0.0f64;
    let mut sum_b = 0.0f64;
    let mut sum_ab = 0.0f64;
    let mut sq_sum_a = 0.0f64;
    let mut sq_sum_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        sum_a += x;
        sum_b += y;
        sum_ab += x * y;
        sq_sum_a += x * x;
        sq_sum_b += y * y;
    }

    let numerator = n * sum_ab - sum_a * sum_b;
    let denominator = ((n * sq_sum_a - sum_a * sum_a) * (n * sq_sum_b - sum_b * sum_b)).sqrt();

    if denominator <= f64::EPSILON || !denominator.is_finite() {
        return Ok(0.0);
    }
    Ok((numerator / denominator) as f32)
}

/// Correlate the reference and attempt gestures axis by axis.
///
/// Both gestures must have the same length; the comparison fails with
/// [`Error::LengthMismatch`] otherwise and the caller reports an
/// indeterminate outcome.
pub fn correlate_axes(reference: &Gesture, attempt: &Gesture) -> Result<CorrelationResult> {
    if reference.len() != attempt.len() {
        return Err(Error::LengthMismatch {
            reference: reference.len(),
            attempt: attempt.len(),
        });
    }

    let mut result = [0.0f32; AXES];
    for (axis, slot) in result.iter_mut().enumerate() {
        *slot = pearson(&reference.axis_series(axis), &attempt.axis_series(axis))?;
    }
    Ok(result)
}

/// Accept/reject policy over a [`CorrelationResult`].
#[derive(Debug, Clone)]
pub struct MatchPolicy {
    /// Per-axis acceptance threshold a coefficient must exceed.
    pub correlation_limit: f32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            correlation_limit: 0.1,
        }
    }
}

impl MatchPolicy {
    pub fn new(correlation_limit: f32) -> Self {
        Self { correlation_limit }
    }

    /// Turn per-axis correlations into a decision.
    ///
    /// The attempt is accepted iff the count of axes whose coefficient
    /// exceeds the limit is exactly one. Not "at least one", not "all
    /// three": two or three matching axes reject just like zero do.
    pub fn decide(&self, correlation: CorrelationResult) -> MatchDecision {
        let above = correlation
            .iter()
            .filter(|&&c| c > self.correlation_limit)
            .count();
        MatchDecision {
            accepted: above == 1,
            correlation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gesture_x(series: &[f32]) -> Gesture {
        Gesture::from_samples(series.iter().map(|&v| [v, 0.0, 0.0]).collect())
    }

    #[test]
    fn test_pearson_symmetric() {
        let a = [1.0, 2.0, 4.0, 3.0, 5.0];
        let b = [2.0, 1.0, 3.0, 5.0, 4.0];
        assert_relative_eq!(
            pearson(&a, &b).unwrap(),
            pearson(&b, &a).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_pearson_self_is_one() {
        let a = [1.0, -2.0, 3.5, 0.25, 7.0];
        assert_relative_eq!(pearson(&a, &a).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_anticorrelated() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson(&a, &b).unwrap(), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_constant_series_is_zero_not_nan() {
        let a = [5.0; 8];
        let b = [5.0; 8];
        let r = pearson(&a, &b).unwrap();
        assert_eq!(r, 0.0);
        assert!(!r.is_nan());
    }

    #[test]
    fn test_pearson_empty_series_is_zero() {
        assert_eq!(pearson(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_pearson_length_mismatch() {
        let err = pearson(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                reference: 2,
                attempt: 1
            }
        ));
    }

    #[test]
    fn test_correlate_axes_self_comparison() {
        let g = Gesture::from_samples(vec![
            [1.0, 4.0, -1.0],
            [2.0, 2.0, -3.0],
            [3.0, 8.0, -2.0],
            [4.0, 1.0, -5.0],
        ]);
        let result = correlate_axes(&g, &g).unwrap();
        for &r in &result {
            assert_relative_eq!(r, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_correlate_axes_length_mismatch() {
        let a = gesture_x(&[1.0, 2.0, 3.0]);
        let b = gesture_x(&[1.0, 2.0]);
        assert!(correlate_axes(&a, &b).is_err());
    }

    // The exact-one acceptance rule is deliberate: a second matching axis
    // flips the decision to rejected.
    #[test]
    fn test_decide_exactly_one_axis_accepts() {
        let policy = MatchPolicy::default();
        let decision = policy.decide([0.95, 0.02, 0.03]);
        assert!(decision.accepted);
        assert_eq!(decision.correlation, [0.95, 0.02, 0.03]);
    }

    #[test]
    fn test_decide_two_axes_reject() {
        let policy = MatchPolicy::default();
        assert!(!policy.decide([0.95, 0.92, 0.03]).accepted);
    }

    #[test]
    fn test_decide_all_axes_reject() {
        let policy = MatchPolicy::default();
        assert!(!policy.decide([0.95, 0.92, 0.88]).accepted);
    }

    #[test]
    fn test_decide_zero_axes_reject() {
        let policy = MatchPolicy::default();
        assert!(!policy.decide([0.05, -0.4, 0.0]).accepted);
    }

    #[test]
    fn test_decide_threshold_is_exclusive() {
        let policy = MatchPolicy::new(0.1);
        // Exactly at the limit does not count as above it
        assert!(!policy.decide([0.1, 0.0, 0.0]).accepted);
        assert!(policy.decide([0.10001, 0.0, 0.0]).accepted);
    }
}
