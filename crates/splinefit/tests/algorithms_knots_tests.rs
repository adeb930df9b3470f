#![cfg(feature = "dev")]
//! Tests for knot vectors and knot placement.
//!
//! These tests verify how knot vectors are built and refined:
//! - Clamped knot vectors and interpolation knots
//! - The doubling insertion schedule
//! - Residual bookkeeping and median-sample knot insertion
//!
//! ## Test Organization
//!
//! 1. **Knot Vectors** - Clamped vectors and interpolation knots
//! 2. **Insertion Schedule** - Batch sizes
//! 3. **Knot Placement** - Residual accumulation and insertion

use approx::assert_relative_eq;

use splinefit::internals::algorithms::knots::{
    clamped_knots, interpolation_knots, InsertionSchedule, KnotPlacement,
};
use splinefit::internals::algorithms::least_squares::solve_least_squares;
use splinefit::internals::primitives::buffer::FitWorkspace;

// V-shaped data on 10 unit-spaced samples.
fn v_samples() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| (v - 4.5f64).abs()).collect();
    let w = vec![1.0; 10];
    (x, y, w)
}

// ============================================================================
// Knot Vector Tests
// ============================================================================

/// Test a clamped knot vector without interior knots.
///
/// Verifies the `2k + 2` repeated end knots.
#[test]
fn test_clamped_knots_polynomial() {
    let t = clamped_knots(-1.0, 2.0, 3, &[]);

    assert_eq!(t, vec![-1.0, -1.0, -1.0, -1.0, 2.0, 2.0, 2.0, 2.0]);
}

/// Test a clamped knot vector with interior knots.
///
/// Verifies that interior knots sit between the repeated ends.
#[test]
fn test_clamped_knots_interior() {
    let t = clamped_knots(0.0, 1.0, 2, &[0.25, 0.5]);

    assert_eq!(t, vec![0.0, 0.0, 0.0, 0.25, 0.5, 1.0, 1.0, 1.0]);
}

/// Test interpolation knots for odd degree.
///
/// Verifies that interior samples are used directly, skipping (k + 1) / 2 at each end.
#[test]
fn test_interpolation_knots_odd_degree() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();

    assert_eq!(
        interpolation_knots(&x, 3),
        vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
    );
    assert_eq!(
        interpolation_knots(&x, 1),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
    );
}

/// Test interpolation knots for even degree.
///
/// Verifies that midpoints between samples are used.
#[test]
fn test_interpolation_knots_even_degree() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();

    assert_eq!(
        interpolation_knots(&x, 2),
        vec![1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5]
    );
}

/// Test interpolation knots for the minimum sample count.
///
/// Verifies that `m = k + 1` samples need no interior knots.
#[test]
fn test_interpolation_knots_minimum_samples() {
    let x = vec![0.0, 1.0, 2.0, 3.0];

    assert!(interpolation_knots(&x, 3).is_empty());
}

/// Test the knot count of an interpolating spline.
///
/// Verifies `n = m + k + 1` for every degree.
#[test]
fn test_interpolation_knot_count() {
    let x: Vec<f64> = (0..12).map(|i| (i as f64).sqrt()).collect();

    for k in 1..=5 {
        let interior = interpolation_knots(&x, k);
        let t = clamped_knots(x[0], x[11], k, &interior);
        assert_eq!(t.len(), x.len() + k + 1, "degree {}", k);
    }
}

// ============================================================================
// Insertion Schedule Tests
// ============================================================================

/// Test the doubling schedule.
///
/// Verifies the batch sizes 1, 2, 4, 8, 16.
#[test]
fn test_insertion_schedule_doubles() {
    let mut schedule = InsertionSchedule::default();
    let batches: Vec<usize> = (0..5).map(|_| schedule.next_batch()).collect();

    assert_eq!(batches, vec![1, 2, 4, 8, 16]);
}

// ============================================================================
// Knot Placement Tests
// ============================================================================

/// Test the initial placement.
///
/// Verifies a single interval holding all interior samples.
#[test]
fn test_placement_initial_state() {
    let placement = KnotPlacement::<f64>::new(10);

    assert!(placement.interior().is_empty());
    assert_eq!(placement.interval_counts(), &[8]);
    assert_eq!(placement.num_knots(3), 8);
}

/// Test that accumulated residuals add up to the residual sum.
///
/// Verifies that splitting boundary samples between intervals conserves fp.
#[test]
fn test_accumulate_residuals_conserves_total() {
    let (x, y, w) = v_samples();
    let mut placement = KnotPlacement::new(x.len());
    let mut ws = FitWorkspace::new(x.len(), 12);

    let knots = clamped_knots(0.0, 9.0, 1, &[]);
    let fp = solve_least_squares(&x, &y, &w, &knots, 1, &mut ws).unwrap();
    placement.accumulate_residuals(&y, &w, 1, &ws);

    // Line through V-data: constant 2.5, fp = 2 * (4 + 1 + 0 + 1 + 4).
    assert_relative_eq!(fp, 20.0, epsilon = 1e-10);
    assert_relative_eq!(placement.interval_residuals()[0], 20.0, epsilon = 1e-10);

    placement.insert(&x).unwrap();
    let knots = clamped_knots(0.0, 9.0, 1, placement.interior());
    let fp = solve_least_squares(&x, &y, &w, &knots, 1, &mut ws).unwrap();
    placement.accumulate_residuals(&y, &w, 1, &ws);

    let total: f64 = placement.interval_residuals().iter().sum();
    assert_eq!(placement.interval_residuals().len(), 2);
    assert_relative_eq!(total, fp, max_relative = 1e-10);
}

/// Test insertion at the median interior sample.
///
/// Verifies the new knot and the split of sample counts and residuals.
#[test]
fn test_insert_median_sample() {
    let (x, y, w) = v_samples();
    let mut placement = KnotPlacement::new(x.len());
    let mut ws = FitWorkspace::new(x.len(), 12);

    let knots = clamped_knots(0.0, 9.0, 1, &[]);
    solve_least_squares(&x, &y, &w, &knots, 1, &mut ws).unwrap();
    placement.accumulate_residuals(&y, &w, 1, &ws);

    // 8 interior samples x[1..9]; the knot goes to x[0 + 8 / 2 + 1].
    let knot = placement.insert(&x);

    assert_eq!(knot, Some(5.0));
    assert_eq!(placement.interior(), &[5.0]);
    assert_eq!(placement.interval_counts(), &[4, 3]);
    assert_relative_eq!(placement.interval_residuals()[0], 10.0, epsilon = 1e-10);
    assert_relative_eq!(placement.interval_residuals()[1], 7.5, epsilon = 1e-10);
}

/// Test that insertion targets the interval with the largest residual.
///
/// Verifies the second knot lands in the worse-fitting interval.
#[test]
fn test_insert_largest_residual_interval() {
    let (x, y, w) = v_samples();
    let mut placement = KnotPlacement::new(x.len());
    let mut ws = FitWorkspace::new(x.len(), 12);

    let knots = clamped_knots(0.0, 9.0, 1, &[]);
    solve_least_squares(&x, &y, &w, &knots, 1, &mut ws).unwrap();
    placement.accumulate_residuals(&y, &w, 1, &ws);
    placement.insert(&x);

    let knots = clamped_knots(0.0, 9.0, 1, placement.interior());
    solve_least_squares(&x, &y, &w, &knots, 1, &mut ws).unwrap();
    placement.accumulate_residuals(&y, &w, 1, &ws);
    let residuals = placement.interval_residuals().to_vec();
    assert!(residuals[0] > residuals[1]);

    let knot = placement.insert(&x);

    assert_eq!(knot, Some(3.0));
    assert_eq!(placement.interior(), &[3.0, 5.0]);
    assert_eq!(placement.interval_counts(), &[2, 1, 3]);
}

/// Test insertion without any residual.
///
/// Verifies that nothing is inserted when every interval fits exactly.
#[test]
fn test_insert_without_residual() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let mut placement = KnotPlacement::<f64>::new(x.len());

    assert_eq!(placement.insert(&x), None);
    assert!(placement.interior().is_empty());
}

/// Test relocation to the interpolation knots.
///
/// Verifies that relocation replaces the interior knots and clears the counts.
#[test]
fn test_relocate_for_interpolation() {
    let (x, _, _) = v_samples();
    let mut placement = KnotPlacement::<f64>::new(x.len());
    placement.relocate_for_interpolation(&x, 3);

    assert_eq!(placement.interior(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(placement.num_knots(3), x.len() + 4);
    assert!(placement.interval_counts().iter().all(|&c| c == 0));
}
