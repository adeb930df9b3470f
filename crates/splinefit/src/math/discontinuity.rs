//! Jumps of the kth derivative of the B-splines at interior knots.
//!
//! A spline of degree `k` is a polynomial of degree `k` on every knot interval,
//! so its kth derivative is piecewise constant and jumps only at interior knots.
//! Penalising the squared jumps measures how far the spline is from a single
//! polynomial; the smoothing-parameter search rotates these rows into the
//! observation triangle.
//!
//! Row `r` belongs to interior knot `t[k + 1 + r]` and touches the `k + 2`
//! B-splines `B[r], ..., B[r + k + 1]` whose support contains that knot.
//! Rows are scaled by `(number of intervals / domain width)^k` so the penalty
//! is independent of the abscissa units.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::{BandRow, BAND_WIDTH, MAX_DEGREE};

/// Build the `(n - 2k - 2) x (k + 2)` matrix of scaled kth-derivative jumps.
pub fn derivative_jumps<T: Float>(knots: &[T], degree: usize) -> Vec<BandRow<T>> {
    let n = knots.len();
    let k = degree;
    let k1 = k + 1;
    let k2 = k + 2;
    let nk1 = n - k1;
    let interior = n.saturating_sub(2 * k1);

    let intervals = T::from(nk1 - k).unwrap_or(T::one());
    let fac = intervals / (knots[nk1] - knots[k]);

    let mut rows = Vec::with_capacity(interior);
    let mut h = [T::zero(); 2 * (MAX_DEGREE + 1)];

    for r in 0..interior {
        let l = r + k1;
        let tl = knots[l];

        // Distances from the knot to its k + 1 neighbours on each side.
        for j in 0..k1 {
            h[j] = tl - knots[l + j - k1];
            h[j + k1] = tl - knots[l + j + 1];
        }

        let mut row = [T::zero(); BAND_WIDTH];
        for (j, slot) in row.iter_mut().enumerate().take(k2) {
            let mut prod = h[j];
            for i in 1..=k {
                prod = prod * h[j + i] * fac;
            }
            *slot = (knots[r + j + k1] - knots[r + j]) / prod;
        }
        rows.push(row);
    }

    rows
}
