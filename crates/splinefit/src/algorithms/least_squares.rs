//! Banded weighted least squares for B-spline coefficients.
//!
//! ## Purpose
//!
//! This module computes the coefficients `c` minimising
//! `sum_i (w_i * (y_i - sum_j c_j B_j(x_i)))^2` for a fixed knot vector, and
//! the penalised variant used while searching for the smoothing parameter.
//!
//! ## Design notes
//!
//! * **Orthogonal factorisation**: Each weighted observation row has at most
//!   `k + 1` non-zeros and is rotated into an upper-triangular band with
//!   Givens rotations; the normal equations are never formed.
//! * **Residual by-product**: The part of each right-hand side that no
//!   rotation can absorb is exactly that row's residual, so the residual sum
//!   of squares falls out of the triangularisation for free.
//! * **Reusable triangle**: The penalised solve starts from a copy of the
//!   observation triangle, so each smoothing-parameter trial only rotates in
//!   the penalty rows.
//!
//! ## Key concepts
//!
//! * **Observation system**: Rows `w_i B(x_i)` with right-hand side `w_i y_i`.
//! * **Penalty rows**: Derivative jumps scaled by `1 / p`, right-hand side zero.
//!
//! ## Invariants
//!
//! * Knots satisfy the Schoenberg-Whitney conditions for a full-rank system;
//!   otherwise the solve reports `NumericalSingularity`.
//!
//! ## Non-goals
//!
//! * Dense solves or normal equations.
//! * Knot selection (handled by the knot placement and engine layers).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::basis::basis_at;
use crate::math::givens::{back_substitute, givens, rotate};
use crate::primitives::buffer::{BandRow, FitWorkspace, BAND_WIDTH};
use crate::primitives::errors::SplineError;

// ============================================================================
// Row Rotation
// ============================================================================

/// Rotate one row, starting at column `first`, into the triangle.
///
/// `row` holds the `width` non-zero entries of the incoming row and `rhs_value`
/// its right-hand side. Returns what remains of the right-hand side, which is
/// the row's contribution to the residual.
pub fn rotate_row<T: Float>(
    band: &mut [BandRow<T>],
    rhs: &mut [T],
    first: usize,
    row: &mut BandRow<T>,
    width: usize,
    rhs_value: T,
) -> T {
    let mut yi = rhs_value;
    for i in 0..width {
        let piv = row[i];
        if piv == T::zero() {
            continue;
        }
        let target = first + i;
        let (cos, sin) = givens(piv, &mut band[target][0]);
        rotate(cos, sin, &mut yi, &mut rhs[target]);
        for i1 in (i + 1)..width {
            rotate(cos, sin, &mut row[i1], &mut band[target][i1 - i]);
        }
    }
    yi
}

// ============================================================================
// Observation System
// ============================================================================

/// Rotate every weighted observation into the banded triangle.
///
/// Fills the basis rows and spans of `ws` and returns the residual sum of
/// squares of the least-squares spline on `knots`.
pub fn triangularize<T: Float>(
    x: &[T],
    y: &[T],
    w: &[T],
    knots: &[T],
    degree: usize,
    ws: &mut FitWorkspace<T>,
) -> T {
    let ncoef = knots.len() - degree - 1;
    ws.reset(ncoef);

    let mut fp = T::zero();
    for i in 0..x.len() {
        let (span, values) = basis_at(knots, degree, x[i]);
        ws.basis.push(values);
        ws.spans.push(span);

        let wi = w[i];
        let mut row = [T::zero(); BAND_WIDTH];
        for j in 0..=degree {
            row[j] = values[j] * wi;
        }

        let residual = rotate_row(
            &mut ws.band,
            &mut ws.rhs,
            span - degree,
            &mut row,
            degree + 1,
            y[i] * wi,
        );
        fp = fp + residual * residual;
    }

    fp
}

/// Fit the least-squares spline on `knots`.
///
/// On success the coefficients are in `ws.coefficients` and the returned
/// value is the weighted residual sum of squares.
pub fn solve_least_squares<T: Float>(
    x: &[T],
    y: &[T],
    w: &[T],
    knots: &[T],
    degree: usize,
    ws: &mut FitWorkspace<T>,
) -> Result<T, SplineError> {
    let fp = triangularize(x, y, w, knots, degree, ws);
    ws.coefficients.copy_from_slice(&ws.rhs);
    back_substitute(&ws.band, degree + 1, &mut ws.coefficients)?;
    Ok(fp)
}

// ============================================================================
// Penalised System
// ============================================================================

/// Rotate one penalty row, starting at column `first`, into the triangle.
///
/// The triangle rows to the right of `first` reach further than the penalty
/// row, so the rotation fills in as it goes: the row is shifted one column
/// per step and carried through to the last column.
pub fn rotate_penalty_row<T: Float>(
    band: &mut [BandRow<T>],
    rhs: &mut [T],
    first: usize,
    row: &mut BandRow<T>,
    degree: usize,
) {
    let ncoef = band.len();
    let mut yi = T::zero();

    for j in first..ncoef {
        let (cos, sin) = givens(row[0], &mut band[j][0]);
        rotate(cos, sin, &mut yi, &mut rhs[j]);
        if j + 1 == ncoef {
            break;
        }

        let reach = (degree + 1).min(ncoef - 1 - j);
        for i in 0..reach {
            rotate(cos, sin, &mut row[i + 1], &mut band[j][i + 1]);
            row[i] = row[i + 1];
        }
        row[reach] = T::zero();
    }
}

/// Fit the penalised spline for smoothing parameter `p`.
///
/// Requires a prior `triangularize` on the same knots. The observation
/// triangle in `ws.band` is left untouched.
pub fn solve_penalized<T: Float>(
    jumps: &[BandRow<T>],
    degree: usize,
    p: T,
    ws: &mut FitWorkspace<T>,
) -> Result<(), SplineError> {
    let width = degree + 2;
    let pinv = T::one() / p;

    ws.penalized.copy_from_slice(&ws.band);
    ws.coefficients.copy_from_slice(&ws.rhs);

    for (r, jump) in jumps.iter().enumerate() {
        let mut row = [T::zero(); BAND_WIDTH];
        for j in 0..width {
            row[j] = jump[j] * pinv;
        }
        rotate_penalty_row(&mut ws.penalized, &mut ws.coefficients, r, &mut row, degree);
    }

    back_substitute(&ws.penalized, width, &mut ws.coefficients)
}

// ============================================================================
// Residuals
// ============================================================================

/// Weighted residual sum of squares of the coefficients held in `ws`.
pub fn residual_sum<T: Float>(y: &[T], w: &[T], degree: usize, ws: &FitWorkspace<T>) -> T {
    y.iter()
        .zip(w.iter())
        .enumerate()
        .fold(T::zero(), |acc, (i, (&yi, &wi))| {
            let r = wi * (ws.fitted_value(i, degree) - yi);
            acc + r * r
        })
}
