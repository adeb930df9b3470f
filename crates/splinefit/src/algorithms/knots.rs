//! Knot vectors and residual-driven knot insertion.
//!
//! ## Purpose
//!
//! This module builds clamped knot vectors and decides where the fitting
//! engine adds interior knots while refining a fit.
//!
//! ## Design notes
//!
//! * **Clamped ends**: Every knot vector repeats the first and last abscissa
//!   `k + 1` times; only the interior knots are stored and manipulated.
//! * **Knots on samples**: Inserted knots always coincide with a sample
//!   abscissa, so every knot interval keeps at least one sample and the
//!   Schoenberg-Whitney conditions hold for every intermediate knot set.
//! * **Nested schedule**: The number of knots added per refinement is
//!   1, 2, 4, ... regardless of the smoothing factor. Together with the
//!   deterministic choice of position this makes the knot sets visited for
//!   different smoothing factors prefixes of one sequence.
//!
//! ## Key concepts
//!
//! * **Interval residual**: Weighted squared residual of the samples inside a
//!   knot interval; the first sample of an interval is shared half and half
//!   with the interval to its left.
//! * **Interior count**: Number of samples strictly inside an interval (not
//!   sitting on one of its knots). Only intervals with interior samples can
//!   receive a knot.
//! * **Interpolation knots**: With `m` samples the interpolating spline has
//!   `m - k - 1` interior knots at samples (odd `k`) or sample midpoints (even `k`).
//!
//! ## Invariants
//!
//! * Interior knots are strictly increasing and strictly inside the domain.
//! * `residuals.len() == counts.len() == interior.len() + 1`.
//!
//! ## Non-goals
//!
//! * Knot removal or free-knot optimisation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::FitWorkspace;

// ============================================================================
// Knot Vectors
// ============================================================================

/// Build the clamped knot vector on `[lower, upper]` with the given interior knots.
pub fn clamped_knots<T: Float>(lower: T, upper: T, degree: usize, interior: &[T]) -> Vec<T> {
    let mut knots = Vec::with_capacity(2 * degree + 2 + interior.len());
    knots.extend(core::iter::repeat(lower).take(degree + 1));
    knots.extend_from_slice(interior);
    knots.extend(core::iter::repeat(upper).take(degree + 1));
    knots
}

/// Interior knots of the interpolating spline of degree `k` through `x`.
pub fn interpolation_knots<T: Float>(x: &[T], degree: usize) -> Vec<T> {
    let count = x.len().saturating_sub(degree + 1);
    let offset = degree / 2 + 1;
    let half = T::from(0.5).unwrap_or(T::one() / (T::one() + T::one()));

    (0..count)
        .map(|l| {
            if degree % 2 == 1 {
                x[offset + l]
            } else {
                (x[offset + l - 1] + x[offset + l]) * half
            }
        })
        .collect()
}

// ============================================================================
// Insertion Schedule
// ============================================================================

/// Number of knots to add at each refinement: 1, 2, 4, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionSchedule {
    next: usize,
}

impl Default for InsertionSchedule {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl InsertionSchedule {
    /// Return the size of the next batch and advance the schedule.
    pub fn next_batch(&mut self) -> usize {
        let batch = self.next;
        self.next = self.next.saturating_mul(2);
        batch
    }
}

// ============================================================================
// Knot Placement
// ============================================================================

/// Interior knots of a fit under refinement, with per-interval bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotPlacement<T> {
    interior: Vec<T>,
    residuals: Vec<T>,
    counts: Vec<usize>,
}

impl<T: Float> KnotPlacement<T> {
    /// Start from a single interval spanning all `m` samples.
    pub fn new(m: usize) -> Self {
        Self {
            interior: Vec::new(),
            residuals: vec![T::zero()],
            counts: vec![m.saturating_sub(2)],
        }
    }

    /// Current interior knots.
    #[inline]
    pub fn interior(&self) -> &[T] {
        &self.interior
    }

    /// Residual sum per knot interval, as of the last accumulation.
    #[inline]
    pub fn interval_residuals(&self) -> &[T] {
        &self.residuals
    }

    /// Number of samples strictly inside each knot interval.
    #[inline]
    pub fn interval_counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of knots of the clamped vector for degree `k`.
    #[inline]
    pub fn num_knots(&self, degree: usize) -> usize {
        2 * degree + 2 + self.interior.len()
    }

    /// Distribute the weighted squared residuals of the fit in `ws` over the knot intervals.
    pub fn accumulate_residuals(&mut self, y: &[T], w: &[T], degree: usize, ws: &FitWorkspace<T>) {
        let half = T::from(0.5).unwrap_or(T::one() / (T::one() + T::one()));
        let intervals = self.interior.len() + 1;

        self.residuals.clear();
        self.residuals.resize(intervals, T::zero());

        let mut current = 0;
        for (i, (&yi, &wi)) in y.iter().zip(w.iter()).enumerate() {
            let r = wi * (ws.fitted_value(i, degree) - yi);
            let term = r * r;
            let interval = (ws.spans[i] - degree).min(intervals - 1);

            if interval != current {
                let share = term * half;
                self.residuals[current] = self.residuals[current] + share;
                self.residuals[interval] = self.residuals[interval] + share;
                current = interval;
            } else {
                self.residuals[interval] = self.residuals[interval] + term;
            }
        }
    }

    /// Insert one knot at the median interior sample of the interval with
    /// the largest residual. Returns the new knot, or `None` when no interval
    /// holds an interior sample.
    pub fn insert(&mut self, x: &[T]) -> Option<T> {
        let mut fpmax = T::zero();
        let mut best: Option<(usize, usize, usize)> = None;
        let mut begin = 0;

        for (j, (&fpint, &count)) in self.residuals.iter().zip(self.counts.iter()).enumerate() {
            if count != 0 && fpint > fpmax {
                fpmax = fpint;
                best = Some((j, count, begin));
            }
            begin += count + 1;
        }

        let (interval, count, begin) = best?;
        let half = count / 2 + 1;
        let knot = *x.get(begin + half)?;

        let left = half - 1;
        let right = count - half;
        let total = T::from(count).unwrap_or(T::one());
        let share = |c: usize| fpmax * T::from(c).unwrap_or(T::zero()) / total;

        self.interior.insert(interval, knot);
        self.counts[interval] = left;
        self.counts.insert(interval + 1, right);
        self.residuals[interval] = share(left);
        self.residuals.insert(interval + 1, share(right));

        Some(knot)
    }

    /// Replace the interior knots by the interpolation knots of `x`.
    pub fn relocate_for_interpolation(&mut self, x: &[T], degree: usize) {
        self.interior = interpolation_knots(x, degree);
        let intervals = self.interior.len() + 1;
        self.residuals = vec![T::zero(); intervals];
        self.counts = vec![0; intervals];
    }
}
