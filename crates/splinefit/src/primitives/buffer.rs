//! Call-scoped working memory for a single spline fit.
//!
//! ## Purpose
//!
//! This module provides the workspace that one fitting call owns for its whole
//! lifetime: the basis values of every sample, the triangularised banded
//! observation matrix, right-hand sides and coefficients. Nothing here is
//! shared between calls, so independent fits may run concurrently.
//!
//! ## Design notes
//!
//! * **Fixed-width rows**: Band rows are arrays sized for the largest supported
//!   degree, so a row never allocates and the active width is `k + 1`
//!   (observations) or `k + 2` (observations plus smoothing penalty).
//! * **Reuse across refinements**: Buffers are sized once from the knot budget
//!   and only logically reset when the knot vector grows.
//!
//! ## Key concepts
//!
//! * **Basis rows**: The `k + 1` non-zero basis values at each sample and the
//!   index of the knot interval holding the sample.
//! * **Band**: Upper-triangular factor R of the weighted design matrix, one row
//!   per coefficient, column `j` of row `i` holding `R[i][i + j]`.
//! * **Penalized band**: Copy of the band into which the smoothing penalty rows
//!   are rotated during the smoothing-parameter search.
//!
//! ## Invariants
//!
//! * `basis.len() == spans.len() == m` after a triangularisation pass.
//! * `band`, `rhs`, `penalized` and `coefficients` hold exactly `n - k - 1`
//!   rows after `reset`.
//!
//! ## Non-goals
//!
//! * Process-wide caching (every fit owns its own workspace).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Constants
// ============================================================================

/// Largest supported spline degree.
pub const MAX_DEGREE: usize = 5;

/// Width of a band row: enough for `k + 2` entries at the largest degree.
pub const BAND_WIDTH: usize = MAX_DEGREE + 2;

/// Non-zero basis values at one abscissa (first `k + 1` entries are used).
pub type BasisRow<T> = [T; MAX_DEGREE + 1];

/// One row of a banded upper-triangular matrix.
pub type BandRow<T> = [T; BAND_WIDTH];

// ============================================================================
// Fit Workspace
// ============================================================================

/// Working arrays owned by a single fitting call.
#[derive(Debug, Clone)]
pub struct FitWorkspace<T> {
    /// Basis values at each sample for the current knot vector.
    pub basis: Vec<BasisRow<T>>,

    /// Knot interval index of each sample.
    pub spans: Vec<usize>,

    /// Triangularised observation matrix.
    pub band: Vec<BandRow<T>>,

    /// Rotated right-hand side of the observation system.
    pub rhs: Vec<T>,

    /// Observation matrix augmented with the smoothing penalty.
    pub penalized: Vec<BandRow<T>>,

    /// B-spline coefficients of the current fit.
    pub coefficients: Vec<T>,
}

impl<T: Float> FitWorkspace<T> {
    /// Allocate a workspace for `m` samples and at most `nest` knots.
    pub fn new(m: usize, nest: usize) -> Self {
        Self {
            basis: Vec::with_capacity(m),
            spans: Vec::with_capacity(m),
            band: Vec::with_capacity(nest),
            rhs: Vec::with_capacity(nest),
            penalized: Vec::with_capacity(nest),
            coefficients: Vec::with_capacity(nest),
        }
    }

    /// Clear all arrays for a fit with `ncoef` coefficients.
    pub fn reset(&mut self, ncoef: usize) {
        let zero_row = [T::zero(); BAND_WIDTH];

        self.basis.clear();
        self.spans.clear();

        self.band.clear();
        self.band.resize(ncoef, zero_row);
        self.penalized.clear();
        self.penalized.resize(ncoef, zero_row);

        self.rhs.clear();
        self.rhs.resize(ncoef, T::zero());
        self.coefficients.clear();
        self.coefficients.resize(ncoef, T::zero());
    }

    /// Number of coefficients the workspace is currently sized for.
    #[inline]
    pub fn num_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    /// Value of the current fit at sample `index`, from the stored basis row.
    #[inline]
    pub fn fitted_value(&self, index: usize, degree: usize) -> T {
        let span = self.spans[index];
        let row = &self.basis[index];
        let first = span - degree;
        (0..=degree).fold(T::zero(), |acc, j| {
            acc + self.coefficients[first + j] * row[j]
        })
    }
}
