//! High-level API for spline fitting.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder for configuring a fit and choosing an execution adapter, and the
//! two plain functions `fit` and `evaluate`.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`SplineBuilder`] via `Spline::new()`.
//! 2. Chain configuration methods (`.degree()`, `.smoothing()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchSplineBuilder;
use crate::engine::executor::EvalPassFn;

// Publicly re-exported types
pub use crate::adapters::batch::BatchSpline;
pub use crate::engine::output::{FitResult, FitStatus, SplineCurve};
pub use crate::evaluation::diagnostics::FitDiagnostics;
pub use crate::evaluation::evaluate::Extrapolation;
pub use crate::primitives::errors::SplineError;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Fluent builder for configuring spline fits and execution modes.
#[derive(Debug, Clone)]
pub struct SplineBuilder<T> {
    /// Spline degree in [1, 5].
    pub degree: Option<usize>,

    /// Smoothing factor (0 interpolates).
    pub smoothing: Option<T>,

    /// Upper bound on the total number of knots.
    pub knot_budget: Option<usize>,

    /// Fixed interior knots (least-squares spline, no knot search).
    pub interior_knots: Option<Vec<T>>,

    /// Relative tolerance on |fp - s|.
    pub tolerance: Option<T>,

    /// Iteration limit of the smoothing-parameter search.
    pub max_iterations: Option<usize>,

    /// Handling of out-of-domain queries.
    pub extrapolation: Option<Extrapolation>,

    /// Enable fit diagnostics.
    pub return_diagnostics: Option<bool>,

    /// Return residuals y - s(x).
    pub compute_residuals: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom evaluation pass function.
    #[doc(hidden)]
    pub custom_eval_pass: Option<EvalPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SplineBuilder<T> {
    /// Select an execution adapter and convert into its builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: SplineAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a builder with every parameter unset.
    pub fn new() -> Self {
        Self {
            degree: None,
            smoothing: None,
            knot_budget: None,
            interior_knots: None,
            tolerance: None,
            max_iterations: None,
            extrapolation: None,
            return_diagnostics: None,
            compute_residuals: None,
            custom_eval_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the spline degree (default 3).
    pub fn degree(mut self, degree: usize) -> Self {
        if self.degree.is_some() {
            self.duplicate_param = Some("degree");
        }
        self.degree = Some(degree);
        self
    }

    /// Set the smoothing factor (default 0, interpolation).
    pub fn smoothing(mut self, smoothing: T) -> Self {
        if self.smoothing.is_some() {
            self.duplicate_param = Some("smoothing");
        }
        self.smoothing = Some(smoothing);
        self
    }

    /// Set the knot budget (default `max(m + k + 1, 2k + 3)`).
    pub fn knot_budget(mut self, budget: usize) -> Self {
        if self.knot_budget.is_some() {
            self.duplicate_param = Some("knot_budget");
        }
        self.knot_budget = Some(budget);
        self
    }

    /// Fit the least-squares spline on these interior knots instead of searching.
    pub fn interior_knots(mut self, knots: &[T]) -> Self {
        if self.interior_knots.is_some() {
            self.duplicate_param = Some("interior_knots");
        }
        self.interior_knots = Some(knots.to_vec());
        self
    }

    /// Set the relative tolerance on |fp - s| (default 0.001).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the smoothing-parameter iteration limit (default 20).
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the out-of-domain policy for evaluation (default `Error`).
    pub fn extrapolation(mut self, mode: Extrapolation) -> Self {
        if self.extrapolation.is_some() {
            self.duplicate_param = Some("extrapolation");
        }
        self.extrapolation = Some(mode);
        self
    }

    /// Include fit diagnostics in the result.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = Some(true);
        self
    }

    /// Include residuals in the result.
    pub fn return_residuals(mut self) -> Self {
        self.compute_residuals = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom evaluation pass function.
    #[doc(hidden)]
    pub fn custom_eval_pass(mut self, pass: EvalPassFn<T>) -> Self {
        self.custom_eval_pass = Some(pass);
        self
    }

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Conversion from the generic builder into an adapter-specific builder.
pub trait SplineAdapter<T: Float> {
    /// The adapter-specific builder.
    type Output;

    /// Convert the generic builder.
    fn convert(builder: SplineBuilder<T>) -> Self::Output;
}

/// Marker for the batch adapter.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> SplineAdapter<T> for Batch {
    type Output = BatchSplineBuilder<T>;

    fn convert(builder: SplineBuilder<T>) -> Self::Output {
        let mut result = BatchSplineBuilder::default();

        if let Some(degree) = builder.degree {
            result.degree = degree;
        }
        if let Some(smoothing) = builder.smoothing {
            result.smoothing = smoothing;
        }
        result.knot_budget = builder.knot_budget;
        result.interior_knots = builder.interior_knots;
        if let Some(tol) = builder.tolerance {
            result.tolerance = tol;
        }
        if let Some(iter) = builder.max_iterations {
            result.max_iterations = iter;
        }
        if let Some(mode) = builder.extrapolation {
            result.extrapolation = mode;
        }
        if let Some(rd) = builder.return_diagnostics {
            result.return_diagnostics = rd;
        }
        if let Some(cr) = builder.compute_residuals {
            result.compute_residuals = cr;
        }
        if let Some(pass) = builder.custom_eval_pass {
            result.custom_eval_pass = Some(pass);
        }
        result.parallel = builder.parallel;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

// ============================================================================
// Plain Functions
// ============================================================================

/// Fit a smoothing spline of the given degree to weighted samples.
///
/// `smoothing = 0` interpolates. Non-converged but usable fits (for example an
/// exhausted knot budget) are returned as `Ok` with the error in
/// [`FitResult::error`]; use [`FitResult::into_converged`] to reject them.
pub fn fit<T: Float>(
    x: &[T],
    y: &[T],
    w: &[T],
    degree: usize,
    smoothing: T,
) -> Result<FitResult<T>, SplineError> {
    SplineBuilder::new()
        .degree(degree)
        .smoothing(smoothing)
        .adapter(Batch)
        .build()?
        .fit_weighted(x, y, w)
}

/// Evaluate a curve at the queries, in query order.
///
/// Queries outside the curve's domain are rejected with `QueryOutOfDomain`.
pub fn evaluate<T: Float>(curve: &SplineCurve<T>, queries: &[T]) -> Result<Vec<T>, SplineError> {
    curve.evaluate(queries)
}
