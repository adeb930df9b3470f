//! Parallel batch adapter for spline fitting.
//!
//! ## Purpose
//!
//! This module wraps the `splinefit` batch adapter and swaps in the parallel
//! evaluation pass. The knot search and every least-squares solve stay
//! sequential; only curve evaluation (fitted values and user queries) is
//! spread across threads.
//!
//! ## Design notes
//!
//! * **Delegation**: Validation and fitting are delegated to `BatchSplineBuilder`.
//! * **Inputs**: Accepts slices, vectors and ndarray arrays via [`SplineInput`].
//! * **Fallback**: Without the `cpu` feature, or with `parallel(false)`, the
//!   sequential pass is used.
//!
//! ## Invariants
//!
//! * Parallel and sequential execution give bit-identical results.
//!
//! ## Non-goals
//!
//! * This adapter does not parallelize the knot search itself.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::evaluate_pass_parallel;

// External dependencies
use num_traits::Float;

// Export dependencies from splinefit crate
use splinefit::internals::adapters::batch::{BatchSpline, BatchSplineBuilder};
use splinefit::internals::engine::output::{FitResult, SplineCurve};
use splinefit::internals::evaluation::evaluate::Extrapolation;
use splinefit::internals::primitives::errors::SplineError;

// Internal dependencies
use crate::input::SplineInput;

// ============================================================================
// Extended Batch Spline Builder
// ============================================================================

/// Builder for the parallel batch spline fitter.
#[derive(Debug, Clone)]
pub struct ParallelBatchSplineBuilder<T: Float> {
    /// Base builder from the splinefit crate
    pub base: BatchSplineBuilder<T>,
}

impl<T: Float> Default for ParallelBatchSplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchSplineBuilder<T> {
    /// Create a new builder with parallel execution enabled.
    fn new() -> Self {
        let base = BatchSplineBuilder::default().parallel(true);
        Self { base }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the spline degree.
    pub fn degree(mut self, degree: usize) -> Self {
        self.base = self.base.degree(degree);
        self
    }

    /// Set the smoothing factor.
    pub fn smoothing(mut self, smoothing: T) -> Self {
        self.base = self.base.smoothing(smoothing);
        self
    }

    /// Set the knot budget.
    pub fn knot_budget(mut self, budget: usize) -> Self {
        self.base = self.base.knot_budget(budget);
        self
    }

    /// Fit a least-squares spline on fixed interior knots.
    pub fn interior_knots(mut self, knots: &[T]) -> Self {
        self.base = self.base.interior_knots(knots);
        self
    }

    /// Set the relative tolerance on |fp - s|.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.base = self.base.tolerance(tolerance);
        self
    }

    /// Set the iteration limit of the smoothing-parameter search.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.base = self.base.max_iterations(iterations);
        self
    }

    /// Set the extrapolation policy used by `evaluate`.
    pub fn extrapolation(mut self, mode: Extrapolation) -> Self {
        self.base = self.base.extrapolation(mode);
        self
    }

    /// Enable returning diagnostics in the result.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.base = self.base.return_diagnostics(enabled);
        self
    }

    /// Enable returning residuals in the result.
    pub fn compute_residuals(mut self, enabled: bool) -> Self {
        self.base = self.base.compute_residuals(enabled);
        self
    }

    // ========================================================================
    // Parallel-Specific Setters
    // ========================================================================

    /// Enable or disable parallel evaluation.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }
}

impl<T: Float + Send + Sync + 'static> ParallelBatchSplineBuilder<T> {
    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch fitter.
    pub fn build(self) -> Result<ParallelBatchSpline<T>, SplineError> {
        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                builder = builder.custom_eval_pass(evaluate_pass_parallel::<T>);
            } else {
                builder.custom_eval_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            builder.custom_eval_pass = None;
        }

        log::debug!(
            "building batch spline fitter (parallel evaluation: {})",
            builder.custom_eval_pass.is_some()
        );

        // Validation is centralized in the splinefit crate
        let inner = builder.build()?;

        Ok(ParallelBatchSpline { inner })
    }
}

// ============================================================================
// Extended Batch Spline Fitter
// ============================================================================

/// Batch spline fitter with parallel evaluation.
#[derive(Debug, Clone)]
pub struct ParallelBatchSpline<T: Float> {
    inner: BatchSpline<T>,
}

impl<T: Float + Send + Sync + 'static> ParallelBatchSpline<T> {
    /// Fit a spline to the samples with unit weights.
    pub fn fit<I1, I2>(&self, x: &I1, y: &I2) -> Result<FitResult<T>, SplineError>
    where
        I1: SplineInput<T> + ?Sized,
        I2: SplineInput<T> + ?Sized,
    {
        let x_slice = x.as_spline_slice()?;
        let y_slice = y.as_spline_slice()?;

        self.inner.fit(x_slice, y_slice)
    }

    /// Fit a spline to weighted samples.
    pub fn fit_weighted<I1, I2, I3>(
        &self,
        x: &I1,
        y: &I2,
        w: &I3,
    ) -> Result<FitResult<T>, SplineError>
    where
        I1: SplineInput<T> + ?Sized,
        I2: SplineInput<T> + ?Sized,
        I3: SplineInput<T> + ?Sized,
    {
        let x_slice = x.as_spline_slice()?;
        let y_slice = y.as_spline_slice()?;
        let w_slice = w.as_spline_slice()?;

        self.inner.fit_weighted(x_slice, y_slice, w_slice)
    }

    /// Evaluate a curve at the queries under the configured extrapolation policy.
    pub fn evaluate<I>(&self, curve: &SplineCurve<T>, queries: &I) -> Result<Vec<T>, SplineError>
    where
        I: SplineInput<T> + ?Sized,
    {
        self.inner.evaluate(curve, queries.as_spline_slice()?)
    }
}
