//! Parallel evaluation engine for fitted B-spline curves.
//!
//! ## Purpose
//!
//! This module provides the parallel evaluation pass that is injected into
//! the `splinefit` execution engine. It is used both for evaluating a fitted
//! curve at user queries and for computing fitted values at the samples when
//! residuals or diagnostics are requested.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacement for the sequential `evaluate_into` pass.
//! * **Parallelism**: Uses `rayon` to split the queries into fixed-size chunks.
//! * **Small inputs**: Below one chunk the sequential pass is called directly.
//!
//! ## Invariants
//!
//! * Output order matches query order.
//! * When several queries fail, the error of the first failing query is returned.
//!
//! ## Non-goals
//!
//! * This module does not fit splines (handled by `splinefit::executor`).
//! * This module does not validate curves (handled by `SplineCurve::new`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from splinefit crate
use splinefit::internals::evaluation::evaluate::{evaluate_into, Extrapolation};
use splinefit::internals::primitives::errors::SplineError;

/// Number of queries handed to one rayon task.
pub const EVAL_CHUNK: usize = 1024;

// ============================================================================
// Parallel Evaluation Function
// ============================================================================

/// Evaluate a spline at every query in parallel, writing into `out`.
#[cfg(feature = "cpu")]
pub fn evaluate_pass_parallel<T>(
    knots: &[T],
    coefficients: &[T],
    degree: usize,
    queries: &[T],
    mode: Extrapolation,
    out: &mut [T],
) -> Result<(), SplineError>
where
    T: Float + Send + Sync,
{
    if queries.len() <= EVAL_CHUNK {
        return evaluate_into(knots, coefficients, degree, queries, mode, out);
    }

    log::trace!(
        "parallel evaluation of {} queries in chunks of {}",
        queries.len(),
        EVAL_CHUNK
    );

    // Indexed collect keeps chunk order, so the first Err is the earliest query.
    let outcomes: Vec<Result<(), SplineError>> = out
        .par_chunks_mut(EVAL_CHUNK)
        .zip(queries.par_chunks(EVAL_CHUNK))
        .map(|(out_chunk, query_chunk)| {
            evaluate_into(knots, coefficients, degree, query_chunk, mode, out_chunk)
        })
        .collect();

    outcomes.into_iter().collect()
}
