//! Error types for spline fitting and evaluation.
//!
//! ## Purpose
//!
//! This module defines every error condition that can occur while fitting a
//! smoothing spline or evaluating a fitted curve: input validation, builder
//! parameter constraints, numerical failures and recoverable non-convergence.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (index, length, bound).
//! * **One-to-one**: Each fitting outcome that is not a clean success maps onto
//!   exactly one variant, so callers never inspect raw status codes.
//! * **No-std**: Supports `no_std` environments by using `alloc` for messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Length mismatches, degree range, sample count,
//!    monotonic abscissas, positive weights, finite values.
//! 2. **Parameter validation**: Smoothing factor, knot budget, tolerance,
//!    iteration limit, user-supplied knots.
//! 3. **Numerical**: Rank-deficient least-squares systems.
//! 4. **Recoverable**: Knot budget exhausted or smoothing search not converged;
//!    these accompany a usable fit rather than replacing it.
//! 5. **Evaluation**: Queries outside the curve's support, malformed curves.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not decide whether a recoverable error is fatal.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for spline fitting and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// A companion sequence does not have one entry per abscissa.
    LengthMismatch {
        /// Which sequence disagrees ("values" or "weights").
        what: &'static str,
        /// Number of abscissas.
        expected: usize,
        /// Length of the offending sequence.
        got: usize,
    },

    /// Spline degree must lie in `[1, 5]`.
    InvalidDegree(usize),

    /// A spline of degree k needs at least k + 1 samples.
    InsufficientSamples {
        /// Number of samples provided.
        got: usize,
        /// Minimum number of samples for the requested degree.
        min: usize,
    },

    /// Abscissas must be strictly increasing.
    NonMonotonicAbscissas {
        /// First index `i` with `x[i] <= x[i - 1]`.
        index: usize,
    },

    /// Every weight must be strictly positive.
    NonPositiveWeight {
        /// Index of the offending weight.
        index: usize,
        /// The offending weight.
        value: f64,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Smoothing factor must be finite and non-negative.
    InvalidSmoothing(f64),

    /// Knot budget is too small for the requested fit.
    InvalidKnotBudget {
        /// Budget provided.
        got: usize,
        /// Minimum budget for this fit.
        min: usize,
    },

    /// Relative tolerance on the residual target must lie in `(0, 1)`.
    InvalidTolerance(f64),

    /// Smoothing-parameter search needs at least one iteration.
    InvalidIterations(usize),

    /// User-supplied interior knots are unusable.
    InvalidKnots(String),

    /// The knot budget ran out before the residual target was met.
    KnotBudgetExhausted {
        /// Weighted residual sum of squares achieved.
        fp: f64,
        /// Requested smoothing factor.
        smoothing: f64,
        /// Number of knots in the returned fit.
        knots: usize,
    },

    /// The smoothing-parameter search hit its iteration limit.
    IterationLimit {
        /// Weighted residual sum of squares achieved.
        fp: f64,
        /// Requested smoothing factor.
        smoothing: f64,
        /// Number of search iterations performed.
        iterations: usize,
    },

    /// The smoothing-parameter search left its bracket (rounding dominates).
    SmoothingSearchFailed {
        /// Weighted residual sum of squares achieved.
        fp: f64,
        /// Requested smoothing factor.
        smoothing: f64,
    },

    /// The banded least-squares system is rank deficient.
    NumericalSingularity {
        /// Row of the triangular factor with a vanishing pivot.
        row: usize,
        /// The vanishing pivot.
        pivot: f64,
    },

    /// A curve assembled from raw parts is malformed.
    InvalidCurve(String),

    /// Query lies outside the curve's support.
    QueryOutOfDomain {
        /// The query abscissa.
        value: f64,
        /// Lower end of the support.
        min: f64,
        /// Upper end of the support.
        max: f64,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl SplineError {
    /// Whether this error accompanies a usable (if imperfect) fit.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::KnotBudgetExhausted { .. }
                | Self::IterationLimit { .. }
                | Self::SmoothingSearchFailed { .. }
        )
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SplineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::LengthMismatch {
                what,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch: {what} has {got} entries, abscissas have {expected}"
                )
            }
            Self::InvalidDegree(k) => write!(f, "Invalid degree: {k} (must be in [1, 5])"),
            Self::InsufficientSamples { got, min } => {
                write!(f, "Too few samples: got {got}, need at least {min}")
            }
            Self::NonMonotonicAbscissas { index } => {
                write!(
                    f,
                    "Abscissas must be strictly increasing (violated at index {index})"
                )
            }
            Self::NonPositiveWeight { index, value } => {
                write!(f, "Weight at index {index} is {value} (must be > 0)")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidSmoothing(s) => {
                write!(f, "Invalid smoothing factor: {s} (must be >= 0 and finite)")
            }
            Self::InvalidKnotBudget { got, min } => {
                write!(f, "Invalid knot budget: {got} (must be at least {min})")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and < 1)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iteration limit: {iter} (must be at least 1)")
            }
            Self::InvalidKnots(msg) => write!(f, "Invalid interior knots: {msg}"),
            Self::KnotBudgetExhausted {
                fp,
                smoothing,
                knots,
            } => {
                write!(
                    f,
                    "Knot budget exhausted at {knots} knots: fp = {fp} > s = {smoothing}"
                )
            }
            Self::IterationLimit {
                fp,
                smoothing,
                iterations,
            } => {
                write!(
                    f,
                    "Smoothing search stopped after {iterations} iterations: fp = {fp}, s = {smoothing}"
                )
            }
            Self::SmoothingSearchFailed { fp, smoothing } => {
                write!(
                    f,
                    "Smoothing search left its bracket: fp = {fp}, s = {smoothing} (s may be too small)"
                )
            }
            Self::NumericalSingularity { row, pivot } => {
                write!(
                    f,
                    "Rank-deficient least-squares system: pivot {pivot} at row {row}"
                )
            }
            Self::InvalidCurve(msg) => write!(f, "Invalid spline curve: {msg}"),
            Self::QueryOutOfDomain { value, min, max } => {
                write!(f, "Query {value} lies outside the curve domain [{min}, {max}]")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for SplineError {}
