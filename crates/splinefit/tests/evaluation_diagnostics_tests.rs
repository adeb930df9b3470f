#![cfg(feature = "dev")]
//! Tests for fit diagnostics.
//!
//! These tests verify the goodness-of-fit metrics reported with a spline fit:
//! - Plain and weighted residual sums of squares
//! - RMSE, MAE and the largest residual
//! - R² including constant data
//!
//! ## Test Organization
//!
//! 1. **Basic Metrics** - Hand-computed values
//! 2. **Edge Cases** - Perfect fits, constant data, empty input
//! 3. **Formatting** - Display output

use approx::{assert_abs_diff_eq, assert_relative_eq};

use splinefit::internals::evaluation::diagnostics::FitDiagnostics;

// ============================================================================
// Basic Metrics Tests
// ============================================================================

/// Test metrics on a small hand-computed example.
///
/// Verifies every field for a single residual of one.
#[test]
fn test_diagnostics_basic_metrics() {
    let y = vec![1.0, 2.0, 3.0, 4.0];
    let fitted = vec![1.0, 2.0, 3.0, 5.0];
    let w = vec![1.0, 1.0, 1.0, 2.0];

    let diag = FitDiagnostics::compute(&y, &fitted, &w);

    assert_relative_eq!(diag.rss, 1.0, epsilon = 1e-14);
    assert_relative_eq!(diag.weighted_rss, 4.0, epsilon = 1e-14);
    assert_relative_eq!(diag.rmse, 0.5, epsilon = 1e-14);
    assert_relative_eq!(diag.mae, 0.25, epsilon = 1e-14);
    assert_relative_eq!(diag.max_abs_residual, 1.0, epsilon = 1e-14);
    // ss_tot = 5, so R^2 = 1 - 1 / 5.
    assert_relative_eq!(diag.r_squared, 0.8, epsilon = 1e-14);
}

/// Test that unit weights make both residual sums equal.
///
/// Verifies `weighted_rss == rss` for w = 1.
#[test]
fn test_diagnostics_unit_weights() {
    let y = vec![0.5, 1.5, -0.25, 2.0, 3.5];
    let fitted = vec![0.4, 1.7, 0.0, 1.9, 3.3];

    let diag = FitDiagnostics::compute(&y, &fitted, &[1.0; 5]);

    assert_relative_eq!(diag.weighted_rss, diag.rss, epsilon = 1e-14);
    assert!(diag.r_squared > 0.9 && diag.r_squared < 1.0);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

/// Test a perfect fit.
///
/// Verifies zero errors and R² of one.
#[test]
fn test_diagnostics_perfect_fit() {
    let y = vec![3.0, 1.0, 4.0, 1.0, 5.0];

    let diag = FitDiagnostics::compute(&y, &y, &[1.0; 5]);

    assert_abs_diff_eq!(diag.rss, 0.0);
    assert_abs_diff_eq!(diag.rmse, 0.0);
    assert_abs_diff_eq!(diag.max_abs_residual, 0.0);
    assert_relative_eq!(diag.r_squared, 1.0, epsilon = 1e-14);
}

/// Test constant observations.
///
/// Verifies R² of one for an exact fit and zero otherwise.
#[test]
fn test_diagnostics_constant_data() {
    let y = vec![2.0; 4];

    let exact = FitDiagnostics::compute(&y, &y, &[1.0; 4]);
    assert_relative_eq!(exact.r_squared, 1.0, epsilon = 1e-14);

    let off = FitDiagnostics::compute(&y, &[2.0, 2.0, 2.0, 2.5], &[1.0; 4]);
    assert_abs_diff_eq!(off.r_squared, 0.0);
}

/// Test empty input.
///
/// Verifies all-zero metrics instead of a division by zero.
#[test]
fn test_diagnostics_empty() {
    let empty: [f64; 0] = [];

    let diag = FitDiagnostics::compute(&empty, &empty, &empty);

    assert_abs_diff_eq!(diag.rss, 0.0);
    assert_abs_diff_eq!(diag.rmse, 0.0);
    assert!(diag.rmse.is_finite());
}

// ============================================================================
// Formatting Tests
// ============================================================================

/// Test the Display implementation.
///
/// Verifies the heading and metric labels.
#[test]
fn test_diagnostics_display() {
    let diag = FitDiagnostics::compute(&[1.0, 2.0], &[1.0, 2.5], &[1.0, 1.0]);
    let text = format!("{}", diag);

    assert!(text.starts_with("Spline Diagnostics:"));
    assert!(text.contains("RMSE"));
    assert!(text.contains("R^2"));
}
