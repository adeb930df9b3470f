//! Smoothing-parameter search.
//!
//! ## Purpose
//!
//! Once the knot set is rich enough that the least-squares spline undershoots
//! the target (`fp < s`), the fit is pulled back towards a polynomial by
//! penalising the jumps of the kth derivative. This module searches for the
//! weight `p` of the data term such that the penalised spline has `fp(p) = s`.
//!
//! ## Design notes
//!
//! * **Monotone target**: `f(p) = fp(p) - s` decreases from `fp0 - s > 0` at
//!   `p = 0` (the least-squares polynomial) to `fp(inf) - s < 0`, so a root is
//!   bracketed from the start.
//! * **Rational interpolation**: Each new `p` is the root of the rational
//!   function `(u p + v) / (p + w)` through the three latest points.
//! * **Bracket repair**: While one side of the bracket is still only known
//!   implicitly, `p` is scaled by fixed factors until the sign pattern of
//!   `f` confirms the bracket.
//!
//! ## Invariants
//!
//! * `p1 < p < p3` once both sides are confirmed, with `f1 > 0 > f3`.
//! * A step that leaves the bracket stalls the search instead of diverging.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::BandRow;

// Bracket repair factors.
const CON1: f64 = 0.1;
const CON9: f64 = 0.9;
const CON4: f64 = 0.04;

// ============================================================================
// Rational Root
// ============================================================================

/// Zero of the rational function through `(p1, f1)`, `(p2, f2)`, `(p3, f3)`.
///
/// `p3 = None` stands for the point at infinity, where `f3` is the limit.
pub fn rational_root<T: Float>(p1: T, f1: T, p2: T, f2: T, p3: Option<T>, f3: T) -> T {
    match p3 {
        None => (p1 * (f1 - f3) * f2 - p2 * (f2 - f3) * f1) / ((f1 - f2) * f3),
        Some(p3) => {
            let h1 = f1 * (f2 - f3);
            let h2 = f2 * (f3 - f1);
            let h3 = f3 * (f1 - f2);
            -(p1 * p2 * h3 + p2 * p3 * h1 + p3 * p1 * h2) / (p1 * h1 + p2 * h2 + p3 * h3)
        }
    }
}

// ============================================================================
// Search State
// ============================================================================

/// Outcome of one search step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStep<T> {
    /// Try the penalised fit again with this `p`.
    Continue(T),

    /// The iterates left the bracket; rounding errors dominate.
    Stalled,
}

/// Bracketing root search for the smoothing parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingSearch<T> {
    p: T,
    p1: T,
    f1: T,
    p3: Option<T>,
    f3: T,
    lower_confirmed: bool,
    upper_confirmed: bool,
    acc: T,
}

impl<T: Float> SmoothingSearch<T> {
    /// Start the search from the observation triangle of the current knots.
    ///
    /// `fp0` is the residual of the least-squares polynomial and `fpms` the
    /// signed miss `fp - s` of the unpenalised spline on the current knots.
    pub fn new(band: &[BandRow<T>], fp0: T, smoothing: T, fpms: T, acc: T) -> Self {
        let trace = band.iter().fold(T::zero(), |acc, row| acc + row[0]);
        let ncoef = T::from(band.len()).unwrap_or(T::one());
        let p = if trace > T::zero() { ncoef / trace } else { T::one() };

        Self {
            p,
            p1: T::zero(),
            f1: fp0 - smoothing,
            p3: None,
            f3: fpms,
            lower_confirmed: false,
            upper_confirmed: false,
            acc,
        }
    }

    /// Current trial value of the smoothing parameter.
    #[inline]
    pub fn p(&self) -> T {
        self.p
    }

    /// Feed back `fp(p) - s` for the current `p` and pick the next trial.
    pub fn advance(&mut self, fpms: T) -> SearchStep<T> {
        let con1 = T::from(CON1).unwrap_or(T::zero());
        let con9 = T::from(CON9).unwrap_or(T::one());
        let con4 = T::from(CON4).unwrap_or(T::one());

        let p2 = self.p;
        let f2 = fpms;

        if !self.upper_confirmed {
            if f2 - self.f3 <= self.acc {
                // Initial p too large.
                self.p3 = Some(p2);
                self.f3 = f2;
                self.p = p2 * con4;
                if self.p <= self.p1 {
                    self.p = self.p1 * con9 + p2 * con1;
                }
                return SearchStep::Continue(self.p);
            }
            if f2 < T::zero() {
                self.upper_confirmed = true;
            }
        }

        if !self.lower_confirmed {
            if self.f1 - f2 <= self.acc {
                // Initial p too small.
                self.p1 = p2;
                self.f1 = f2;
                self.p = p2 / con4;
                if let Some(p3) = self.p3 {
                    if self.p >= p3 {
                        self.p = p2 * con1 + p3 * con9;
                    }
                }
                return SearchStep::Continue(self.p);
            }
            if f2 > T::zero() {
                self.lower_confirmed = true;
            }
        }

        if f2 >= self.f1 || f2 <= self.f3 {
            return SearchStep::Stalled;
        }

        self.p = rational_root(self.p1, self.f1, p2, f2, self.p3, self.f3);
        if f2 < T::zero() {
            self.p3 = Some(p2);
            self.f3 = f2;
        } else {
            self.p1 = p2;
            self.f1 = f2;
        }

        SearchStep::Continue(self.p)
    }
}
