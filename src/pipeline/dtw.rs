//! Dynamic Time Warping distance between two gestures.
//!
//! Alternate similarity metric, robust to differing lengths and speeds.
//! Available for extension and analysis; the unlock decision is driven by
//! per-axis correlation, never by this distance.

use crate::core::types::{Gesture, Sample};

/// Euclidean distance between two samples in 3-D.
fn euclidean(a: &Sample, b: &Sample) -> f32 {
    let mut sum = 0.0f32;
    for axis in 0..3 {
        let d = a[axis] - b[axis];
        sum += d * d;
    }
    sum.sqrt()
}

/// Classic DTW distance with per-sample Euclidean local cost.
///
/// `(n+1) x (m+1)` cost matrix, `D[0][0] = 0`, all other boundary cells
/// infinite, `D[i][j] = cost(i,j) + min(D[i-1][j], D[i][j-1], D[i-1][j-1])`.
/// O(n*m) time and space. Comparing against an empty gesture yields
/// infinity (no warping path exists) unless both are empty, which yields 0.
pub fn dtw_distance(a: &Gesture, b: &Gesture) -> f32 {
    let n = a.len();
    let m = b.len();

    let mut matrix = vec![vec![f32::INFINITY; m + 1]; n + 1];
    matrix[0][0] = 0.0;

    for i in 1..=n {
        for j in 1..=m {
            let cost = euclidean(&a.samples()[i - 1], &b.samples()[j - 1]);
            let best = matrix[i - 1][j]
                .min(matrix[i][j - 1])
                .min(matrix[i - 1][j - 1]);
            matrix[i][j] = cost + best;
        }
    }

    matrix[n][m]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gesture(samples: &[Sample]) -> Gesture {
        Gesture::from_samples(samples.to_vec())
    }

    #[test]
    fn test_self_distance_is_zero() {
        let g = gesture(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_relative_eq!(dtw_distance(&g, &g), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_symmetric_and_non_negative() {
        let a = gesture(&[[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let b = gesture(&[[0.5, 0.0, 0.0], [1.5, 0.0, 0.0]]);
        let ab = dtw_distance(&a, &b);
        let ba = dtw_distance(&b, &a);
        assert_relative_eq!(ab, ba, epsilon = 1e-6);
        assert!(ab >= 0.0);
    }

    #[test]
    fn test_time_stretched_copy_is_close() {
        // Same shape at half speed warps with zero extra cost
        let a = gesture(&[[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let stretched = gesture(&[
            [0.0; 3],
            [0.0; 3],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
        ]);
        assert_relative_eq!(dtw_distance(&a, &stretched), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_distinct_gestures_have_positive_distance() {
        let a = gesture(&[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let b = gesture(&[[0.0, 5.0, 0.0], [0.0, 6.0, 0.0]]);
        assert!(dtw_distance(&a, &b) > 1.0);
    }

    #[test]
    fn test_empty_edge_cases() {
        let empty = Gesture::new();
        let g = gesture(&[[1.0, 0.0, 0.0]]);
        assert_eq!(dtw_distance(&empty, &empty), 0.0);
        assert!(dtw_distance(&empty, &g).is_infinite());
        assert!(dtw_distance(&g, &empty).is_infinite());
    }
}
