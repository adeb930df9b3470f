//! Spline curve evaluation.
//!
//! ## Purpose
//!
//! This module evaluates a spline given by its knots, coefficients and degree
//! at a sequence of query abscissas.
//!
//! ## Design notes
//!
//! * **Local**: Each value is the dot product of the `k + 1` non-zero basis
//!   values with the coefficients aligned to the query's knot interval.
//! * **Order-preserving**: Output slot `i` always holds the value at query `i`;
//!   queries may be unsorted and may repeat.
//! * **Read-only**: The curve is borrowed immutably, so evaluation may be
//!   split across threads by callers.
//!
//! ## Key concepts
//!
//! * **Domain**: `[t[k], t[n - k - 1]]`, the first and last sample abscissas of the fit.
//! * **Extrapolation**: What happens to queries outside the domain.
//!
//! ## Invariants
//!
//! * Evaluation is deterministic: equal queries give bit-identical values.
//! * The domain end points themselves are always evaluated, never extrapolated.
//!
//! ## Non-goals
//!
//! * Derivatives, integrals or root finding.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::basis::basis_at;
use crate::primitives::errors::SplineError;

// ============================================================================
// Extrapolation Policy
// ============================================================================

/// Handling of queries outside the curve's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Reject the query with `QueryOutOfDomain`.
    #[default]
    Error,

    /// Continue the polynomial piece of the nearest end interval.
    Extrapolate,

    /// Return zero.
    Zero,

    /// Return the curve value at the nearest domain end.
    Clamp,
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate the spline `(knots, coefficients, degree)` at a single abscissa.
pub fn evaluate_point<T: Float>(
    knots: &[T],
    coefficients: &[T],
    degree: usize,
    x: T,
    mode: Extrapolation,
) -> Result<T, SplineError> {
    if !x.is_finite() {
        return Err(SplineError::InvalidNumericValue(format!(
            "query={}",
            x.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let n = knots.len();
    let lower = knots[degree];
    let upper = knots[n - degree - 1];

    let x = if x < lower || x > upper {
        match mode {
            Extrapolation::Error => {
                return Err(SplineError::QueryOutOfDomain {
                    value: x.to_f64().unwrap_or(f64::NAN),
                    min: lower.to_f64().unwrap_or(f64::NAN),
                    max: upper.to_f64().unwrap_or(f64::NAN),
                });
            }
            Extrapolation::Zero => return Ok(T::zero()),
            Extrapolation::Clamp => x.max(lower).min(upper),
            Extrapolation::Extrapolate => x,
        }
    } else {
        x
    };

    let (span, values) = basis_at(knots, degree, x);
    let first = span - degree;
    Ok((0..=degree).fold(T::zero(), |acc, j| {
        acc + coefficients[first + j] * values[j]
    }))
}

/// Evaluate at every query, writing `out[i]` for `queries[i]`.
///
/// Stops at the first failing query.
pub fn evaluate_into<T: Float>(
    knots: &[T],
    coefficients: &[T],
    degree: usize,
    queries: &[T],
    mode: Extrapolation,
    out: &mut [T],
) -> Result<(), SplineError> {
    debug_assert_eq!(queries.len(), out.len());
    for (slot, &x) in out.iter_mut().zip(queries.iter()) {
        *slot = evaluate_point(knots, coefficients, degree, x, mode)?;
    }
    Ok(())
}

/// Evaluate at every query and collect the values in query order.
pub fn evaluate<T: Float>(
    knots: &[T],
    coefficients: &[T],
    degree: usize,
    queries: &[T],
    mode: Extrapolation,
) -> Result<Vec<T>, SplineError> {
    queries
        .iter()
        .map(|&x| evaluate_point(knots, coefficients, degree, x, mode))
        .collect()
}
