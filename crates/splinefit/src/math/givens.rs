//! Givens rotations and banded back substitution.
//!
//! ## Purpose
//!
//! This module provides the orthogonal building blocks of the banded
//! least-squares solver: constructing and applying plane rotations, and
//! solving the resulting upper-triangular banded system.
//!
//! ## Design notes
//!
//! * **Row-by-row QR**: Observations are rotated into the triangle one at a
//!   time, so the full design matrix is never formed.
//! * **Rank detection**: Back substitution rejects pivots that vanish relative
//!   to the largest pivot instead of producing non-finite coefficients.
//!
//! ## Invariants
//!
//! * Diagonal entries produced by `givens` are non-negative.
//! * `back_substitute` solves in place: the right-hand side goes in, the
//!   solution comes out.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::BandRow;
use crate::primitives::errors::SplineError;

/// Pivots smaller than this multiple of epsilon, relative to the largest
/// pivot, mark the system as rank deficient.
const RANK_TOLERANCE: f64 = 100.0;

// ============================================================================
// Plane Rotations
// ============================================================================

/// Build the rotation that annihilates `piv` against the diagonal `diag`.
///
/// Returns `(cos, sin)` and overwrites `diag` with the rotated diagonal.
#[inline]
pub fn givens<T: Float>(piv: T, diag: &mut T) -> (T, T) {
    let dd = piv.hypot(*diag);
    if dd == T::zero() {
        return (T::one(), T::zero());
    }
    let cos = *diag / dd;
    let sin = piv / dd;
    *diag = dd;
    (cos, sin)
}

/// Apply the rotation `(cos, sin)` to the pair `(a, b)`.
///
/// `a` is the entry of the incoming row, `b` the entry of the triangle.
#[inline]
pub fn rotate<T: Float>(cos: T, sin: T, a: &mut T, b: &mut T) {
    let (x, y) = (*a, *b);
    *b = cos * y + sin * x;
    *a = cos * x - sin * y;
}

// ============================================================================
// Back Substitution
// ============================================================================

/// Solve `R c = z` for an upper-triangular banded `R` of the given `width`.
///
/// `values` holds `z` on entry and `c` on successful return.
pub fn back_substitute<T: Float>(
    band: &[BandRow<T>],
    width: usize,
    values: &mut [T],
) -> Result<(), SplineError> {
    let n = band.len();
    debug_assert_eq!(values.len(), n);

    let max_pivot = band.iter().fold(T::zero(), |acc, row| acc.max(row[0].abs()));
    let tol = T::from(RANK_TOLERANCE).unwrap_or(T::one()) * T::epsilon() * max_pivot;

    for i in (0..n).rev() {
        let pivot = band[i][0];
        if !(pivot.abs() > tol) {
            return Err(singular(i, pivot));
        }

        let mut store = values[i];
        for l in 1..width.min(n - i) {
            store = store - values[i + l] * band[i][l];
        }

        let value = store / pivot;
        if !value.is_finite() {
            return Err(singular(i, pivot));
        }
        values[i] = value;
    }

    Ok(())
}

fn singular<T: Float>(row: usize, pivot: T) -> SplineError {
    SplineError::NumericalSingularity {
        row,
        pivot: pivot.to_f64().unwrap_or(f64::NAN),
    }
}
