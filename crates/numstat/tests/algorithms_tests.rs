#![cfg(feature = "dev")]
//! Tests for the algorithms layer.
//!
//! These tests verify the per-point and per-pass algorithms:
//! - Delta skipping and linear interpolation
//! - Local weighted regression at one query point
//! - Robustness weights and a collapsed scale
//! - Sliding co-moment updates
//!
//! ## Test Organization
//!
//! 1. **Interpolation** - Default delta, gaps and tie copying
//! 2. **Regression** - Linear reproduction and fallbacks
//! 3. **Robustness** - Bisquare weights and degenerate scales
//! 4. **Co-Moment** - Filling, sliding and NaN poisoning

use approx::assert_relative_eq;

use numstat::internals::algorithms::comoment::{Centering, SlidingComoment};
use numstat::internals::algorithms::interpolation::{
    default_delta, interpolate_gap, skip_within_delta,
};
use numstat::internals::algorithms::regression::fit_point;
use numstat::internals::algorithms::robustness::update_robustness_weights;
use numstat::internals::math::kernel::bisquare;
use numstat::internals::primitives::window::Window;

// ============================================================================
// Interpolation Tests
// ============================================================================

/// Test the default merge distance.
///
/// Verifies one percent of the x-range, and zero for empty input.
#[test]
fn test_default_delta() {
    assert_relative_eq!(default_delta(&[0.0, 3.0, 10.0]), 0.1);
    assert_relative_eq!(default_delta(&[4.0, 25.0]), 0.21);
    assert_eq!(default_delta::<f64>(&[]), 0.0);
}

/// Test gap interpolation.
///
/// Verifies interior points fall on the line between the anchors.
#[test]
fn test_interpolate_gap() {
    let x = vec![0.0, 1.0, 2.0, 4.0];
    let mut fitted = vec![0.0, -1.0, -1.0, 8.0];

    interpolate_gap(&x, &mut fitted, 0, 3);

    assert_eq!(fitted, vec![0.0, 2.0, 4.0, 8.0]);
}

/// Test skipping within delta.
///
/// Verifies the resume point sits just before the first point beyond delta.
#[test]
fn test_skip_within_delta() {
    let x = vec![0.0, 0.5, 1.0, 1.0, 3.0];
    let mut fitted = vec![5.0, 0.0, 0.0, 0.0, 0.0];

    let (anchor, next) = skip_within_delta(&x, &mut fitted, 0, 1.0);

    assert_eq!(anchor, 0);
    assert_eq!(next, 3);
    assert_eq!(fitted, vec![5.0, 0.0, 0.0, 0.0, 0.0], "No ties to copy");
}

/// Test tie copying.
///
/// Verifies exact x-ties inherit the anchor's fit and move the anchor.
#[test]
fn test_skip_copies_ties() {
    let x = vec![2.0, 2.0, 2.0, 5.0];
    let mut fitted = vec![7.0, 0.0, 0.0, 0.0];

    let (anchor, next) = skip_within_delta(&x, &mut fitted, 0, 0.0);

    assert_eq!(anchor, 2);
    assert_eq!(next, 3);
    assert_eq!(fitted, vec![7.0, 7.0, 7.0, 0.0]);
}

/// Test skipping to the end.
///
/// Verifies the last point is always fitted when everything is within delta.
#[test]
fn test_skip_to_end() {
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let mut fitted = vec![0.0; 10];

    let (anchor, next) = skip_within_delta(&x, &mut fitted, 0, 100.0);

    assert_eq!((anchor, next), (0, 9));
}

// ============================================================================
// Regression Tests
// ============================================================================

/// Test local linear reproduction.
///
/// Verifies a line is fitted exactly.
#[test]
fn test_fit_point_linear() {
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|&xi| 2.0 * xi + 1.0).collect();
    let mut weights = vec![0.0; 10];

    let fit = fit_point(&x, &y, 5.0, Window { left: 3, right: 6 }, None, &mut weights);

    assert_relative_eq!(fit.unwrap(), 11.0, epsilon = 1e-12);
}

/// Test constant x.
///
/// Verifies a zero-width neighborhood falls back to the mean of y.
#[test]
fn test_fit_point_constant_x() {
    let x = vec![1.0, 1.0, 1.0];
    let y = vec![1.0, 2.0, 6.0];
    let mut weights = vec![0.0; 3];

    let fit = fit_point(&x, &y, 1.0, Window { left: 0, right: 2 }, None, &mut weights);

    assert_relative_eq!(fit.unwrap(), 3.0, epsilon = 1e-12);
}

/// Test robustness weights in the local fit.
///
/// Verifies a zero-weighted point has no influence.
#[test]
fn test_fit_point_robustness() {
    let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let y = vec![0.0, 1.0, 2.0, 100.0, 4.0];
    let robust = vec![1.0, 1.0, 1.0, 0.0, 1.0];
    let mut weights = vec![0.0; 5];

    let window = Window { left: 0, right: 4 };
    let fit = fit_point(&x, &y, 2.0, window, Some(&robust), &mut weights);

    assert_relative_eq!(fit.unwrap(), 2.0, epsilon = 1e-12);
}

/// Test an all-zero neighborhood.
///
/// Verifies no fit is reported when every weight vanishes.
#[test]
fn test_fit_point_zero_weights() {
    let x = vec![0.0, 1.0, 2.0];
    let y = vec![3.0, 4.0, 5.0];
    let robust = vec![0.0; 3];
    let mut weights = vec![0.0; 3];

    let window = Window { left: 0, right: 2 };
    assert!(fit_point(&x, &y, 1.0, window, Some(&robust), &mut weights).is_none());
}

/// Test the scanned range.
///
/// Verifies weights beyond the neighborhood are left untouched.
#[test]
fn test_fit_point_scan_range() {
    let x = vec![0.0, 1.0, 2.0, 3.0, 9.0];
    let y = vec![0.0, 5.0, 0.0, 0.0, 0.0];
    let mut weights = vec![42.0; 5];

    let fit = fit_point(&x, &y, 1.0, Window { left: 0, right: 2 }, None, &mut weights);

    // Both edges sit at exactly h, beyond the 0.999 h cutoff
    assert_relative_eq!(fit.unwrap(), 5.0, epsilon = 1e-12);
    assert_eq!(weights[0], 0.0);
    assert_eq!(&weights[2..], &[42.0, 42.0, 42.0]);
}

// ============================================================================
// Robustness Tests
// ============================================================================

/// Test bisquare robustness weights.
///
/// Verifies weights against six median absolute residuals.
#[test]
fn test_robustness_weights() {
    let residuals = vec![0.0, 0.5, 10.0, -0.5, 0.2];
    let mut scratch = vec![0.0; 5];
    let mut weights = vec![1.0; 5];

    update_robustness_weights(&residuals, &mut scratch, &mut weights);

    // Median |r| = 0.5, so the scale is 3
    assert_eq!(weights[0], 1.0);
    assert_relative_eq!(weights[1], bisquare(0.5 / 3.0), epsilon = 1e-12);
    assert_eq!(weights[2], 0.0, "Outlier should be rejected");
    assert_relative_eq!(weights[3], weights[1]);
    assert_relative_eq!(weights[4], bisquare(0.2 / 3.0), epsilon = 1e-12);
}

/// Test all-zero residuals.
///
/// Verifies every point keeps full weight.
#[test]
fn test_robustness_zero_residuals() {
    let residuals = vec![0.0; 4];
    let mut scratch = vec![0.0; 4];
    let mut weights = vec![0.5; 4];

    update_robustness_weights(&residuals, &mut scratch, &mut weights);

    assert_eq!(weights, vec![1.0; 4]);
}

/// Test a collapsed residual scale.
///
/// Verifies that when most residuals are zero the scale is zero, so every
/// non-zero residual is rejected and the rest keep full weight.
#[test]
fn test_robustness_zero_scale() {
    let residuals = vec![0.0, 0.0, 0.0, 0.0, 6.0];
    let mut scratch = vec![0.0; 5];
    let mut weights = vec![0.5; 5];

    update_robustness_weights(&residuals, &mut scratch, &mut weights);

    assert_eq!(weights, vec![1.0, 1.0, 1.0, 1.0, 0.0]);

    let residuals = vec![1e-15, 0.0, -2e-15, 0.0, 0.0];
    update_robustness_weights(&residuals, &mut scratch, &mut weights);
    assert_eq!(weights, vec![0.0, 1.0, 0.0, 1.0, 1.0]);
}

/// Test empty residuals.
///
/// Verifies nothing is touched.
#[test]
fn test_robustness_empty() {
    let mut weights: Vec<f64> = Vec::new();
    update_robustness_weights(&[], &mut [], &mut weights);
    assert!(weights.is_empty());
}

// ============================================================================
// Co-Moment Tests
// ============================================================================

/// Test the filling phase with sample centering.
///
/// Verifies means, second moments and the divisor.
#[test]
fn test_comoment_filling() {
    let mut state = SlidingComoment::<f64>::new(3, Centering::Sample);
    assert_eq!(state.divisor(), None);

    state.push(1.0, 2.0);
    assert_eq!(state.divisor(), Some(0.0));

    state.push(2.0, 4.0);
    state.push(3.0, 6.0);

    assert!(state.is_full());
    assert_eq!(state.count(), 3);
    assert_relative_eq!(state.means().0, 2.0);
    assert_relative_eq!(state.means().1, 4.0);
    assert_relative_eq!(state.m2x(), 2.0);
    assert_relative_eq!(state.m2y(), 8.0);
    assert_relative_eq!(state.comoment(), 4.0);
    assert_eq!(state.divisor(), Some(2.0));
}

/// Test the sliding phase with sample centering.
///
/// Verifies the oldest pair is replaced and the means shift.
#[test]
fn test_comoment_sliding() {
    let mut state = SlidingComoment::<f64>::new(3, Centering::Sample);
    for (x, y) in [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0)] {
        state.push(x, y);
    }

    assert_eq!(state.count(), 3);
    assert_relative_eq!(state.means().0, 3.0, epsilon = 1e-12);
    assert_relative_eq!(state.means().1, 6.0, epsilon = 1e-12);
    assert_relative_eq!(state.m2x(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(state.comoment(), 4.0, epsilon = 1e-12);
}

/// Test known centering.
///
/// Verifies fixed means and the `count` divisor.
#[test]
fn test_comoment_known_means() {
    let centering = Centering::Known {
        mean_x: 0.0,
        mean_y: 0.0,
    };
    let mut state = SlidingComoment::<f64>::new(2, centering);
    assert_eq!(state.centering(), centering);

    state.push(1.0, 1.0);
    state.push(2.0, 2.0);
    assert_relative_eq!(state.comoment(), 5.0);
    assert_eq!(state.divisor(), Some(2.0));

    state.push(3.0, 3.0);
    assert_relative_eq!(state.comoment(), 13.0);
    assert_relative_eq!(state.m2x(), 13.0);
    assert_eq!(state.means(), (0.0, 0.0), "Means never move");
}

/// Test NaN poisoning and recovery.
///
/// Verifies a NaN fills the window and clears once evicted.
#[test]
fn test_comoment_nan_poisoning() {
    let mut state = SlidingComoment::<f64>::new(2, Centering::Sample);

    state.push(f64::NAN, 1.0);
    assert!(state.is_full(), "A NaN marks the window full");
    assert!(state.comoment().is_nan());

    state.push(1.0, 1.0);
    assert!(state.comoment().is_nan(), "NaN still in the window");

    state.push(3.0, 5.0);
    assert_eq!(state.count(), 2);
    assert_relative_eq!(state.comoment(), 4.0, epsilon = 1e-12);
    assert_relative_eq!(state.means().0, 2.0, epsilon = 1e-12);
}

/// Test a single-pair window.
///
/// Verifies each push replaces the state.
#[test]
fn test_comoment_unit_window() {
    let mut state = SlidingComoment::<f64>::new(1, Centering::Sample);
    state.push(4.0, 5.0);
    state.push(7.0, 1.0);

    assert_eq!(state.count(), 1);
    assert_eq!(state.means(), (7.0, 1.0));
    assert_eq!(state.comoment(), 0.0);
    assert_eq!(state.divisor(), Some(0.0));
}
