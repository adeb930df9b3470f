//! Input validation for spline fitting configuration and data.
//!
//! ## Purpose
//!
//! This module rejects malformed fitting requests before any numerical work
//! begins: sample arrays, degree, smoothing factor, knot budget, search
//! controls and caller-supplied interior knots.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Fixed order**: Lengths, degree, sample count, finiteness, ordering and
//!   weights are checked in that order, so a request with several defects
//!   always reports the same one.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Sample set**: Strictly increasing abscissas with finite values and
//!   strictly positive weights, at least `k + 1` of them.
//! * **Knot budget**: Upper bound on the total knot count; interpolation
//!   needs `m + k + 1`, any fit needs at least `2k + 2`.
//! * **Schoenberg-Whitney**: Fixed interior knots must leave every B-spline
//!   with a distinct sample strictly inside its support.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort or repair input data.
//! * This module does not perform the fitting itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::MAX_DEGREE;
use crate::primitives::errors::SplineError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for spline configuration and input data.
///
/// Provides static methods for validating fitting parameters and input data.
/// All methods return `Result<(), SplineError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate the sample set for a fit of the given degree.
    pub fn validate_inputs<T: Float>(
        x: &[T],
        y: &[T],
        w: &[T],
        degree: usize,
    ) -> Result<(), SplineError> {
        let m = x.len();

        // Check 1: Matching lengths
        if y.len() != m {
            return Err(SplineError::LengthMismatch {
                what: "values",
                expected: m,
                got: y.len(),
            });
        }
        if w.len() != m {
            return Err(SplineError::LengthMismatch {
                what: "weights",
                expected: m,
                got: w.len(),
            });
        }

        // Check 2: Degree range
        Self::validate_degree(degree)?;

        // Check 3: Enough samples for the degree
        if m <= degree {
            return Err(SplineError::InsufficientSamples {
                got: m,
                min: degree + 1,
            });
        }

        // Check 4: All values finite
        for i in 0..m {
            Self::validate_scalar(x[i], "x", i)?;
            Self::validate_scalar(y[i], "y", i)?;
            Self::validate_scalar(w[i], "w", i)?;
        }

        // Check 5: Strictly increasing abscissas
        if let Some(i) = (1..m).find(|&i| x[i] <= x[i - 1]) {
            return Err(SplineError::NonMonotonicAbscissas { index: i });
        }

        // Check 6: Positive weights
        if let Some(i) = (0..m).find(|&i| w[i] <= T::zero()) {
            return Err(SplineError::NonPositiveWeight {
                index: i,
                value: w[i].to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(())
    }

    /// Validate a single indexed sample value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str, index: usize) -> Result<(), SplineError> {
        if !val.is_finite() {
            return Err(SplineError::InvalidNumericValue(format!(
                "{}[{}]={}",
                name,
                index,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the spline degree.
    pub fn validate_degree(degree: usize) -> Result<(), SplineError> {
        if degree == 0 || degree > MAX_DEGREE {
            return Err(SplineError::InvalidDegree(degree));
        }
        Ok(())
    }

    /// Validate the smoothing factor.
    pub fn validate_smoothing<T: Float>(smoothing: T) -> Result<(), SplineError> {
        if !smoothing.is_finite() || smoothing < T::zero() {
            return Err(SplineError::InvalidSmoothing(
                smoothing.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the relative tolerance on `|fp - s|`.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), SplineError> {
        if !tol.is_finite() || tol <= T::zero() || tol >= T::one() {
            return Err(SplineError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the iteration limit of the smoothing-parameter search.
    pub fn validate_iterations(iterations: usize) -> Result<(), SplineError> {
        if iterations == 0 {
            return Err(SplineError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the knot budget against the sample count and request.
    ///
    /// # Notes
    ///
    /// * Every fit needs room for the `2k + 2` boundary knots.
    /// * Interpolation (`s = 0`) needs the full `m + k + 1` knots.
    pub fn validate_knot_budget(
        nest: usize,
        m: usize,
        degree: usize,
        interpolating: bool,
    ) -> Result<(), SplineError> {
        let min = if interpolating {
            m + degree + 1
        } else {
            2 * degree + 2
        };
        if nest < min {
            return Err(SplineError::InvalidKnotBudget { got: nest, min });
        }
        Ok(())
    }

    /// Validate caller-supplied interior knots against the samples.
    pub fn validate_interior_knots<T: Float>(
        x: &[T],
        degree: usize,
        interior: &[T],
    ) -> Result<(), SplineError> {
        let m = x.len();
        let lower = x[0];
        let upper = x[m - 1];

        // Check 1: Count (one coefficient per sample at most)
        let max = m - degree - 1;
        if interior.len() > max {
            return Err(SplineError::InvalidKnots(format!(
                "{} interior knots given, at most {} fit {} samples",
                interior.len(),
                max,
                m
            )));
        }

        // Check 2: Finite, strictly inside the domain, strictly increasing
        for (i, &t) in interior.iter().enumerate() {
            if !t.is_finite() || t <= lower || t >= upper {
                return Err(SplineError::InvalidKnots(format!(
                    "knot {} = {} is not strictly inside the data range",
                    i,
                    t.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if i > 0 && t <= interior[i - 1] {
                return Err(SplineError::InvalidKnots(format!(
                    "knots must be strictly increasing (violated at index {})",
                    i
                )));
            }
        }

        // Check 3: Schoenberg-Whitney, greedily matching interior samples
        // to the supports of the interior B-splines.
        let n = interior.len() + 2 * degree + 2;
        let nk1 = n - degree - 1;
        let knot = |i: usize| -> T {
            if i <= degree {
                lower
            } else if i >= n - degree - 1 {
                upper
            } else {
                interior[i - degree - 1]
            }
        };

        let mut i = 0;
        for j in 1..nk1.saturating_sub(1) {
            let left = knot(j);
            let right = knot(j + degree + 1);
            loop {
                i += 1;
                if i >= m - 1 || x[i] >= right {
                    return Err(SplineError::InvalidKnots(format!(
                        "no sample strictly inside the support of B-spline {}",
                        j
                    )));
                }
                if x[i] > left {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), SplineError> {
        if let Some(param) = duplicate_param {
            return Err(SplineError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
