//! B-spline basis evaluation.
//!
//! ## Purpose
//!
//! This module locates the knot interval holding an abscissa and evaluates the
//! `k + 1` B-splines of degree `k` that do not vanish there.
//!
//! ## Design notes
//!
//! * **Search**: The interval is found by binary search over the interior
//!   knots, so each lookup costs `O(log n)`.
//! * **Recurrence**: Values come from the triangular de Boor / Cox recurrence,
//!   raising the degree one step at a time from the degree-0 indicator.
//! * **Allocation-free**: Results live in a fixed-size array.
//!
//! ## Key concepts
//!
//! * **Span**: Index `l` with `t[l] <= x < t[l + 1]` and `k <= l <= n - k - 2`.
//!   The right end of the domain belongs to the last span; abscissas outside
//!   the domain map to the nearest end span, which continues its polynomial piece.
//! * **Local support**: At span `l` only `B[l - k], ..., B[l]` are non-zero.
//!
//! ## Invariants
//!
//! * The returned values are non-negative and sum to one inside the domain.
//! * A coincident knot pair contributes zero instead of dividing by zero.
//!
//! ## Non-goals
//!
//! * Derivatives or integrals of the basis.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::{BasisRow, MAX_DEGREE};

// ============================================================================
// Interval Search
// ============================================================================

/// Find the span `l` with `t[l] <= x < t[l + 1]`, clamped to `[k, n - k - 2]`.
///
/// `knots` must hold at least `2k + 2` entries.
#[inline]
pub fn find_span<T: Float>(knots: &[T], degree: usize, x: T) -> usize {
    let n = knots.len();
    let interior = &knots[degree + 1..n - degree - 1];
    degree + interior.partition_point(|&t| t <= x)
}

// ============================================================================
// Basis Values
// ============================================================================

/// Evaluate the non-zero B-splines of degree `k` at `x` in span `l`.
///
/// Entry `j` of the result holds `B[l - k + j](x)` for `j` in `0..=k`.
pub fn basis_values<T: Float>(knots: &[T], degree: usize, x: T, span: usize) -> BasisRow<T> {
    debug_assert!(degree <= MAX_DEGREE);

    let mut h = [T::zero(); MAX_DEGREE + 1];
    let mut hh = [T::zero(); MAX_DEGREE];
    h[0] = T::one();

    for j in 1..=degree {
        hh[..j].copy_from_slice(&h[..j]);
        h[0] = T::zero();
        for i in 0..j {
            let right = knots[span + i + 1];
            let left = knots[span + i + 1 - j];
            if right == left {
                h[i + 1] = T::zero();
                continue;
            }
            let f = hh[i] / (right - left);
            h[i] = h[i] + f * (right - x);
            h[i + 1] = f * (x - left);
        }
    }

    h
}

/// Locate the span of `x` and evaluate the non-zero basis functions there.
#[inline]
pub fn basis_at<T: Float>(knots: &[T], degree: usize, x: T) -> (usize, BasisRow<T>) {
    let span = find_span(knots, degree, x);
    (span, basis_values(knots, degree, x, span))
}
