#![cfg(feature = "dev")]
//! Tests for the fitting state machine.
//!
//! These tests step the engine one transition at a time and check the
//! intermediate states as well as the final outcome:
//! - Initial knot choice for interpolation, smoothing and fixed knots
//! - Refinement until `fp <= s` and the smoothing-parameter phase
//! - Knot budget exhaustion and rank-deficient systems
//!
//! ## Test Organization
//!
//! 1. **Initial State** - Starting knot vectors
//! 2. **Transitions** - Fitting, Refining, Smoothing
//! 3. **Terminal States** - Converged, exhausted, singular and stalled outcomes
//! 4. **Executor** - Complete runs with fitted values

use approx::assert_relative_eq;

use splinefit::internals::engine::executor::{
    default_knot_budget, FitConfig, FitEngine, FitExecutor, FitState,
};
use splinefit::internals::engine::output::FitStatus;
use splinefit::internals::primitives::errors::SplineError;

fn data() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let x = vec![
        0.0, 50.0, 75.0, 140.0, 150.0, 200.0, 300.0, 350.0, 450.0, 500.0,
    ];
    let y = vec![40.0, 70.0, 90.0, 150.0, 160.0, 200.0, 80.0, 30.0, 50.0, 80.0];
    (x, y, vec![1.0; 10])
}

// Alternating +-1 on 0..40 with an extra sample `eps` to the right of 19.
fn near_coincident(eps: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut x: Vec<f64> = (0..40).map(|i| i as f64).collect();
    x.insert(20, 19.0 + eps);
    let y: Vec<f64> = (0..x.len())
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let w = vec![1.0; x.len()];
    (x, y, w)
}

fn config(smoothing: f64) -> FitConfig<f64> {
    FitConfig {
        degree: 3,
        smoothing,
        ..Default::default()
    }
}

// ============================================================================
// Initial State Tests
// ============================================================================

/// Test the default knot budget.
///
/// Verifies `max(m + k + 1, 2k + 3)`.
#[test]
fn test_default_knot_budget() {
    assert_eq!(default_knot_budget(10, 3), 14);
    assert_eq!(default_knot_budget(4, 3), 9);
}

/// Test the starting knots for interpolation.
///
/// Verifies that s = 0 starts directly from the `m + k + 1` interpolation knots.
#[test]
fn test_initial_knots_interpolation() {
    let (x, y, w) = data();
    let cfg = config(0.0);
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);
    assert_eq!(engine.state(), FitState::Initial);

    assert_eq!(engine.step().unwrap(), FitState::Fitting);
    assert_eq!(engine.knots().len(), 14);
    assert_eq!(&engine.knots()[4..10], &[75.0, 140.0, 150.0, 200.0, 300.0, 350.0]);
}

/// Test the starting knots for smoothing.
///
/// Verifies that s > 0 starts from the polynomial knot vector.
#[test]
fn test_initial_knots_smoothing() {
    let (x, y, w) = data();
    let cfg = config(100.0);
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    engine.step().unwrap();

    assert_eq!(
        engine.knots(),
        &[0.0, 0.0, 0.0, 0.0, 500.0, 500.0, 500.0, 500.0]
    );
}

// ============================================================================
// Transition Tests
// ============================================================================

/// Test the move from fitting to refining.
///
/// Verifies that a residual above s triggers knot insertion.
#[test]
fn test_fitting_to_refining() {
    let (x, y, w) = data();
    let cfg = config(1.0);
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    engine.step().unwrap();
    assert_eq!(engine.step().unwrap(), FitState::Refining);
    assert!(engine.fp() > 1.0);

    assert_eq!(engine.step().unwrap(), FitState::Fitting);
    assert_eq!(engine.knots().len(), 9);
    assert_eq!(engine.refinements(), 1);
}

/// Test that every refinement adds knots.
///
/// Verifies a strictly increasing knot count bounded by the budget.
#[test]
fn test_refinement_increases_knots() {
    let (x, y, w) = data();
    let cfg = config(10.0);
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    let mut last = 0;
    while !engine.state().is_terminal() {
        let before = engine.state();
        engine.step().unwrap();
        if before == FitState::Refining {
            assert!(engine.knots().len() > last);
        }
        last = engine.knots().len();
        assert!(last <= engine.knot_budget());
    }
}

/// Test entry into the smoothing phase.
///
/// Verifies that undershooting s with interior knots switches to the p-search.
#[test]
fn test_fitting_to_smoothing() {
    let (x, y, w) = data();
    let cfg = config(1000.0);
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    let mut states = Vec::new();
    while !engine.state().is_terminal() {
        states.push(engine.step().unwrap());
    }

    assert!(states.contains(&FitState::Refining));
    assert!(states.contains(&FitState::Smoothing));
    assert_eq!(engine.state(), FitState::Converged);
    assert_eq!(engine.status(), Some(FitStatus::Converged));
}

/// Test that terminal states are sticky.
///
/// Verifies that stepping a finished engine changes nothing.
#[test]
fn test_terminal_state_is_stable() {
    let (x, y, w) = data();
    let cfg = config(1.0e5);
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    engine.step().unwrap();
    assert_eq!(engine.step().unwrap(), FitState::Converged);
    let fp = engine.fp();

    assert_eq!(engine.step().unwrap(), FitState::Converged);
    assert_eq!(engine.fp(), fp);
}

// ============================================================================
// Terminal State Tests
// ============================================================================

/// Test interpolation.
///
/// Verifies the interpolating status and a vanishing residual.
#[test]
fn test_run_interpolating() {
    let (x, y, w) = data();
    let cfg = config(0.0);

    let output = FitEngine::new(&x, &y, &w, &cfg).run().unwrap();

    assert_eq!(output.status, FitStatus::Interpolating);
    assert_eq!(output.knots.len(), 14);
    assert!(output.fp < 1e-12);
    assert!(output.error.is_none());
}

/// Test a smoothing factor above the polynomial residual.
///
/// Verifies that the least-squares polynomial is returned without refinement.
#[test]
fn test_run_least_squares_polynomial() {
    let (x, y, w) = data();
    let cfg = config(1.0e5);

    let output = FitEngine::new(&x, &y, &w, &cfg).run().unwrap();

    assert_eq!(output.status, FitStatus::LeastSquaresPolynomial);
    assert_eq!(output.knots.len(), 8);
    assert_eq!(output.refinements, 0);
    assert_relative_eq!(output.fp, 6811.812806209409, max_relative = 1e-8);
}

/// Test a converged smoothing spline.
///
/// Verifies `|fp - s| <= tol * s` and the recorded smoothing parameter.
#[test]
fn test_run_converged_smoothing() {
    let (x, y, w) = data();
    let cfg = config(1000.0);

    let output = FitEngine::new(&x, &y, &w, &cfg).run().unwrap();

    assert_eq!(output.status, FitStatus::Converged);
    assert!((output.fp - 1000.0).abs() <= 1.0);
    assert!(output.search_iterations >= 1);
    assert!(output.smoothing_parameter.is_some());
    assert!(output.knots.len() > 8 && output.knots.len() < 14);
}

/// Test an exhausted knot budget.
///
/// Verifies the status, the attached error and the returned fit.
#[test]
fn test_run_knot_budget_exhausted() {
    let (x, y, w) = data();
    let cfg = FitConfig {
        knot_budget: Some(9),
        ..config(1.0)
    };
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    let states: Vec<FitState> = (0..4).map(|_| engine.step().unwrap()).collect();

    assert_eq!(
        states,
        vec![
            FitState::Fitting,
            FitState::Refining,
            FitState::Fitting,
            FitState::Exhausted
        ]
    );
    assert_eq!(engine.status(), Some(FitStatus::KnotBudgetExhausted));
    assert!(matches!(
        engine.error(),
        Some(SplineError::KnotBudgetExhausted { knots: 9, .. })
    ));
    assert_eq!(engine.knots().len(), 9);
    assert!(engine.fp() > 1.0);
}

/// Test fixed interior knots.
///
/// Verifies a single least-squares solve on the given knots.
#[test]
fn test_run_fixed_knots() {
    let (x, y, w) = data();
    let cfg = FitConfig {
        interior_knots: Some(vec![150.0, 300.0]),
        ..config(0.0)
    };

    let output = FitEngine::new(&x, &y, &w, &cfg).run().unwrap();

    assert_eq!(output.status, FitStatus::LeastSquares);
    assert_eq!(output.knots.len(), 10);
    assert_eq!(output.refinements, 0);
    assert_relative_eq!(output.fp, 1649.073829561784, max_relative = 1e-8);
}

/// Test a rank-deficient first solve.
///
/// Verifies that the singularity surfaces as an error when no stable fit exists.
#[test]
fn test_run_singular_without_stable_fit() {
    let x: Vec<f64> = (0..11).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..11).map(|i| (i % 3) as f64).collect();
    let w = vec![1.0; 11];
    let cfg = FitConfig {
        degree: 1,
        interior_knots: Some(vec![0.1, 0.2, 0.3]),
        ..Default::default()
    };
    let mut engine = FitEngine::new(&x, &y, &w, &cfg);

    engine.step().unwrap();
    let err = engine.step().unwrap_err();

    assert!(matches!(err, SplineError::NumericalSingularity { .. }));
}

/// Test a rank-deficient penalised solve after a stable fit.
///
/// Verifies that the last interpolating fit is returned with the singularity attached.
#[test]
fn test_run_singular_returns_last_stable_fit() {
    let (x, y, w) = near_coincident(1e-14);
    let cfg = FitConfig {
        degree: 1,
        smoothing: 1.0,
        ..Default::default()
    };

    let output = FitEngine::new(&x, &y, &w, &cfg).run().unwrap();

    assert_eq!(output.status, FitStatus::Singular);
    assert!(matches!(
        output.error,
        Some(SplineError::NumericalSingularity { .. })
    ));
    assert_eq!(output.knots.len(), x.len() + 2);
    assert!(output.fp < 1e-12);
    assert!(output.smoothing_parameter.is_none());
}

/// Test a smoothing-parameter search that loses its bracket.
///
/// Verifies the stalled status with a recoverable error and the last fit.
#[test]
fn test_run_search_stalled() {
    let (x, y, w) = near_coincident(1e-12);
    let cfg = FitConfig {
        degree: 3,
        smoothing: 1.0,
        ..Default::default()
    };

    let output = FitEngine::new(&x, &y, &w, &cfg).run().unwrap();

    assert_eq!(output.status, FitStatus::SearchStalled);
    let err = output.error.unwrap();
    assert!(matches!(err, SplineError::SmoothingSearchFailed { .. }));
    assert!(err.is_recoverable());
    assert!(output.search_iterations >= 1);
    assert_relative_eq!(output.fp, 2.0, max_relative = 1e-6);
}

// ============================================================================
// Executor Tests
// ============================================================================

/// Test fitted values from a complete run.
///
/// Verifies that an interpolating fit reproduces the samples.
#[test]
fn test_executor_fitted_values() {
    let (x, y, w) = data();
    let cfg = FitConfig {
        return_fitted: true,
        ..config(0.0)
    };

    let output = FitExecutor::run_with_config(&x, &y, &w, cfg).unwrap();
    let fitted = output.fitted.unwrap();

    for (f, yi) in fitted.iter().zip(y.iter()) {
        assert_relative_eq!(f, yi, epsilon = 1e-8);
    }
}

/// Test that fitted values are skipped unless requested.
///
/// Verifies `fitted` is `None` by default.
#[test]
fn test_executor_no_fitted_values_by_default() {
    let (x, y, w) = data();

    let output = FitExecutor::run_with_config(&x, &y, &w, config(500.0)).unwrap();

    assert!(output.fitted.is_none());
}
