//! Batch adapter for spline fitting.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: it fits a smoothing
//! spline to a complete, in-memory sample set and evaluates fitted curves.
//!
//! ## Design notes
//!
//! * **Processing**: Validates, fits, then post-processes in a single call.
//! * **Delegation**: Delegates the fit to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent configuration with sensible defaults,
//!   validated once in `build()`.
//! * **Weights**: `fit` uses unit weights, `fit_weighted` takes them explicitly.
//! * **Post-processing**: Residuals and diagnostics are only computed on request.
//!
//! ## Invariants
//!
//! * Abscissas must be strictly increasing; no sorting is performed.
//! * Output order matches input order.
//!
//! ## Non-goals
//!
//! * This adapter does not handle missing values.
//! * This adapter does not sort or deduplicate abscissas.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{default_knot_budget, EvalPassFn, FitConfig, FitExecutor};
use crate::engine::output::{FitResult, SplineCurve};
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::FitDiagnostics;
use crate::evaluation::evaluate::{evaluate_into, Extrapolation};
use crate::primitives::errors::SplineError;

// ============================================================================
// Batch Spline Builder
// ============================================================================

/// Builder for the batch spline fitter.
#[derive(Debug, Clone)]
pub struct BatchSplineBuilder<T: Float> {
    /// Spline degree
    pub degree: usize,

    /// Smoothing factor
    pub smoothing: T,

    /// Upper bound on the number of knots
    pub knot_budget: Option<usize>,

    /// Fixed interior knots
    pub interior_knots: Option<Vec<T>>,

    /// Relative tolerance on |fp - s|
    pub tolerance: T,

    /// Iteration limit of the smoothing-parameter search
    pub max_iterations: usize,

    /// Policy for queries outside the curve domain
    pub extrapolation: Extrapolation,

    /// Whether to compute diagnostic statistics
    pub return_diagnostics: bool,

    /// Whether to return residuals
    pub compute_residuals: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom evaluation pass function.
    #[doc(hidden)]
    pub custom_eval_pass: Option<EvalPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchSplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchSplineBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        let defaults = FitConfig::<T>::default();
        Self {
            degree: defaults.degree,
            smoothing: defaults.smoothing,
            knot_budget: None,
            interior_knots: None,
            tolerance: defaults.tolerance,
            max_iterations: defaults.max_iterations,
            extrapolation: Extrapolation::default(),
            return_diagnostics: false,
            compute_residuals: false,
            custom_eval_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the spline degree.
    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set the smoothing factor.
    pub fn smoothing(mut self, smoothing: T) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the knot budget.
    pub fn knot_budget(mut self, budget: usize) -> Self {
        self.knot_budget = Some(budget);
        self
    }

    /// Fit a least-squares spline on fixed interior knots.
    pub fn interior_knots(mut self, knots: &[T]) -> Self {
        self.interior_knots = Some(knots.to_vec());
        self
    }

    /// Set the relative tolerance on |fp - s|.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration limit of the smoothing-parameter search.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the extrapolation policy used by `evaluate`.
    pub fn extrapolation(mut self, mode: Extrapolation) -> Self {
        self.extrapolation = mode;
        self
    }

    /// Enable returning diagnostics in the result.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.return_diagnostics = enabled;
        self
    }

    /// Enable returning residuals in the result.
    pub fn compute_residuals(mut self, enabled: bool) -> Self {
        self.compute_residuals = enabled;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom evaluation pass function.
    #[doc(hidden)]
    pub fn custom_eval_pass(mut self, pass: EvalPassFn<T>) -> Self {
        self.custom_eval_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch fitter.
    pub fn build(self) -> Result<BatchSpline<T>, SplineError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_degree(self.degree)?;
        Validator::validate_smoothing(self.smoothing)?;
        Validator::validate_tolerance(self.tolerance)?;
        Validator::validate_iterations(self.max_iterations)?;

        Ok(BatchSpline { config: self })
    }
}

// ============================================================================
// Batch Spline Fitter
// ============================================================================

/// Batch spline fitter.
#[derive(Debug, Clone)]
pub struct BatchSpline<T: Float> {
    config: BatchSplineBuilder<T>,
}

impl<T: Float> BatchSpline<T> {
    /// Fit a spline to the samples with unit weights.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<FitResult<T>, SplineError> {
        let w = vec![T::one(); x.len()];
        self.fit_weighted(x, y, &w)
    }

    /// Fit a spline to weighted samples.
    pub fn fit_weighted(&self, x: &[T], y: &[T], w: &[T]) -> Result<FitResult<T>, SplineError> {
        let degree = self.config.degree;
        Validator::validate_inputs(x, y, w, degree)?;

        let m = x.len();
        if let Some(ref knots) = self.config.interior_knots {
            Validator::validate_interior_knots(x, degree, knots)?;
        } else {
            let nest = self
                .config
                .knot_budget
                .unwrap_or_else(|| default_knot_budget(m, degree));
            let interpolating = self.config.smoothing == T::zero();
            Validator::validate_knot_budget(nest, m, degree, interpolating)?;
        }

        let want_fitted = self.config.compute_residuals || self.config.return_diagnostics;

        // Configure batch execution
        let config = FitConfig {
            degree,
            smoothing: self.config.smoothing,
            knot_budget: self.config.knot_budget,
            interior_knots: self.config.interior_knots.clone(),
            tolerance: self.config.tolerance,
            max_iterations: self.config.max_iterations,
            return_fitted: want_fitted,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_eval_pass: self.config.custom_eval_pass,
        };

        let output = FitExecutor::run_with_config(x, y, w, config)?;

        let residuals: Option<Vec<T>> = output.fitted.as_ref().map(|fitted| {
            y.iter()
                .zip(fitted.iter())
                .map(|(&yi, &fi)| yi - fi)
                .collect()
        });

        let diagnostics = match (&output.fitted, self.config.return_diagnostics) {
            (Some(fitted), true) => Some(FitDiagnostics::compute(y, fitted, w)),
            _ => None,
        };

        Ok(FitResult {
            curve: SplineCurve::from_fit(output.knots, output.coefficients, degree),
            fp: output.fp,
            smoothing: self.config.smoothing,
            status: output.status,
            error: output.error,
            refinements: output.refinements,
            search_iterations: output.search_iterations,
            smoothing_parameter: output.smoothing_parameter,
            residuals: if self.config.compute_residuals {
                residuals
            } else {
                None
            },
            diagnostics,
        })
    }

    /// Evaluate a curve at the queries under the configured extrapolation policy.
    pub fn evaluate(&self, curve: &SplineCurve<T>, queries: &[T]) -> Result<Vec<T>, SplineError> {
        let pass = self.config.custom_eval_pass.unwrap_or(evaluate_into);
        let mut out = vec![T::zero(); queries.len()];
        pass(
            curve.knots(),
            curve.coefficients(),
            curve.degree(),
            queries,
            self.config.extrapolation,
            &mut out,
        )?;
        Ok(out)
    }
}
