//! High-level API for spline fitting with parallel evaluation.
//!
//! ## Purpose
//!
//! This module extends the `splinefit` fluent API with a batch adapter that
//! evaluates fitted curves on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `splinefit` builder.
//! * **Parallel-First**: The batch adapter defaults to parallel evaluation.
//! * **Feature-Gated**: Parallelism is configurable via the `cpu` feature.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`SplineBuilder`] via `Spline::new()`.
//! 2. Chain configuration methods (`.degree()`, `.smoothing()`, etc.).
//! 3. Select an adapter via `.adapter(Batch)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Import base marker type for delegation
use splinefit::internals::api::Batch as BaseBatch;

// Internal dependencies
use crate::adapters::batch::ParallelBatchSplineBuilder;

// Publicly re-exported types
pub use crate::adapters::batch::ParallelBatchSpline;
pub use splinefit::internals::api::{SplineAdapter, SplineBuilder};
pub use splinefit::internals::engine::output::{FitResult, FitStatus, SplineCurve};
pub use splinefit::internals::evaluation::diagnostics::FitDiagnostics;
pub use splinefit::internals::evaluation::evaluate::Extrapolation;
pub use splinefit::internals::primitives::errors::SplineError;

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> SplineAdapter<T> for Batch {
    type Output = ParallelBatchSplineBuilder<T>;

    fn convert(builder: SplineBuilder<T>) -> Self::Output {
        // Parallel unless the caller opted out
        let parallel = builder.parallel.unwrap_or(true);

        let mut base = <BaseBatch as SplineAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        ParallelBatchSplineBuilder { base }
    }
}
