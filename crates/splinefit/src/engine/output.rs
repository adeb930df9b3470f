//! Output types and result structures for spline fitting.
//!
//! ## Purpose
//!
//! This module defines the fitted curve (`SplineCurve`), the fitting outcome
//! (`FitStatus`) and the full result of a fit (`FitResult`).
//!
//! ## Design notes
//!
//! * **Immutable curve**: A `SplineCurve` is built once, validated, and only
//!   read afterwards; evaluation borrows it.
//! * **Named outcomes**: Every way a fit can end is a `FitStatus` variant;
//!   the recoverable ones also carry the matching `SplineError`.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Key concepts
//!
//! * **Curve**: Knots `t` (length `n`), coefficients `c` (length `n - k - 1`)
//!   and degree `k`, defining a piecewise polynomial on `[t[k], t[n - k - 1]]`.
//! * **fp**: Weighted residual sum of squares achieved by the fit.
//! * **Optional Outputs**: Residuals and diagnostics are only populated on request.
//!
//! ## Invariants
//!
//! * A `SplineCurve` always satisfies the clamped knot-vector invariants.
//! * `FitResult::error` is `Some` exactly when the status is not converged.
//!
//! ## Non-goals
//!
//! * This module does not perform the fitting.
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::FitDiagnostics;
use crate::evaluation::evaluate::{evaluate, evaluate_point, Extrapolation};
use crate::primitives::errors::SplineError;

// ============================================================================
// Spline Curve
// ============================================================================

/// A B-spline curve: knots, coefficients and degree.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCurve<T> {
    knots: Vec<T>,
    coefficients: Vec<T>,
    degree: usize,
}

impl<T: Float> SplineCurve<T> {
    /// Assemble a curve from its parts, checking the knot-vector invariants.
    pub fn new(
        knots: Vec<T>,
        coefficients: Vec<T>,
        degree: usize,
    ) -> core::result::Result<Self, SplineError> {
        Validator::validate_degree(degree)?;

        let k = degree;
        let n = knots.len();
        if n < 2 * k + 2 {
            return Err(SplineError::InvalidCurve(format!(
                "{} knots given, degree {} needs at least {}",
                n,
                k,
                2 * k + 2
            )));
        }
        if coefficients.len() != n - k - 1 {
            return Err(SplineError::LengthMismatch {
                what: "coefficients",
                expected: n - k - 1,
                got: coefficients.len(),
            });
        }
        if let Some(i) = knots.iter().position(|t| !t.is_finite()) {
            return Err(SplineError::InvalidCurve(format!("knot {} is not finite", i)));
        }
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(SplineError::InvalidCurve(format!(
                "coefficient {} is not finite",
                i
            )));
        }
        if let Some(i) = (1..n).find(|&i| knots[i] < knots[i - 1]) {
            return Err(SplineError::InvalidCurve(format!(
                "knots must be non-decreasing (violated at index {})",
                i
            )));
        }

        let lower = knots[k];
        let upper = knots[n - k - 1];
        if lower >= upper {
            return Err(SplineError::InvalidCurve("domain has zero width".into()));
        }
        if knots[..=k].iter().any(|&t| t != lower) || knots[n - k - 1..].iter().any(|&t| t != upper)
        {
            return Err(SplineError::InvalidCurve(format!(
                "first and last {} knots must repeat the domain ends",
                k + 1
            )));
        }
        if let Some(i) = (k + 1..n - k - 1).find(|&i| knots[i] <= lower || knots[i] >= upper) {
            return Err(SplineError::InvalidCurve(format!(
                "interior knot {} lies on the domain boundary",
                i
            )));
        }
        if let Some(i) = (k + 1..n - k - 1).find(|&i| knots[i] == knots[i + k]) {
            return Err(SplineError::InvalidCurve(format!(
                "knot {} has multiplicity greater than {}",
                i, k
            )));
        }

        Ok(Self {
            knots,
            coefficients,
            degree,
        })
    }

    /// Wrap parts produced by the fitting engine.
    pub(crate) fn from_fit(knots: Vec<T>, coefficients: Vec<T>, degree: usize) -> Self {
        Self {
            knots,
            coefficients,
            degree,
        }
    }

    /// Full knot vector, including the repeated boundary knots.
    #[inline]
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// B-spline coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Spline degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Interior knots only.
    #[inline]
    pub fn interior_knots(&self) -> &[T] {
        let n = self.knots.len();
        &self.knots[self.degree + 1..n - self.degree - 1]
    }

    /// Total number of knots.
    #[inline]
    pub fn num_knots(&self) -> usize {
        self.knots.len()
    }

    /// Number of coefficients (`n - k - 1`).
    #[inline]
    pub fn num_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    /// Domain `[min, max]` on which the curve is defined.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        let n = self.knots.len();
        (self.knots[self.degree], self.knots[n - self.degree - 1])
    }

    /// Value at a single abscissa; out-of-domain queries are an error.
    pub fn value_at(&self, x: T) -> core::result::Result<T, SplineError> {
        evaluate_point(
            &self.knots,
            &self.coefficients,
            self.degree,
            x,
            Extrapolation::Error,
        )
    }

    /// Values at every query, in query order; out-of-domain queries are an error.
    pub fn evaluate(&self, queries: &[T]) -> core::result::Result<Vec<T>, SplineError> {
        self.evaluate_with(queries, Extrapolation::Error)
    }

    /// Values at every query under the given extrapolation policy.
    pub fn evaluate_with(
        &self,
        queries: &[T],
        mode: Extrapolation,
    ) -> core::result::Result<Vec<T>, SplineError> {
        evaluate(&self.knots, &self.coefficients, self.degree, queries, mode)
    }
}

impl<T: Float + Display> Display for SplineCurve<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (lower, upper) = self.domain();
        writeln!(f, "Spline Curve:")?;
        writeln!(f, "  Degree:       {}", self.degree)?;
        writeln!(f, "  Domain:       [{}, {}]", lower, upper)?;
        writeln!(f, "  Knots:        {}", self.knots.len())?;
        writeln!(f, "  Coefficients: {}", self.coefficients.len())?;
        writeln!(f)?;

        writeln!(f, "{:>6} {:>14} {:>14}", "Index", "Knot", "Coefficient")?;
        writeln!(f, "{:-<36}", "")?;
        for (i, t) in self.knots.iter().enumerate() {
            write!(f, "{:>6} {:>14.6}", i, t)?;
            if let Some(c) = self.coefficients.get(i) {
                write!(f, " {:>14.6}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ============================================================================
// Fit Status
// ============================================================================

/// How a fit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStatus {
    /// Smoothing spline with `|fp - s| <= tol * s`.
    Converged,

    /// Interpolating spline (`fp = 0`).
    Interpolating,

    /// Least-squares polynomial: no interior knots were needed.
    LeastSquaresPolynomial,

    /// Least-squares spline on caller-supplied interior knots.
    LeastSquares,

    /// Knot budget reached before `fp <= s`; best fit returned.
    KnotBudgetExhausted,

    /// Smoothing-parameter search hit its iteration limit; last fit returned.
    IterationLimit,

    /// Smoothing-parameter search left its bracket; last fit returned.
    SearchStalled,

    /// A refinement hit a rank-deficient system; last stable fit returned.
    Singular,
}

impl FitStatus {
    /// Whether the fit met its target.
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(
            self,
            Self::Converged | Self::Interpolating | Self::LeastSquaresPolynomial | Self::LeastSquares
        )
    }
}

impl Display for FitStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            Self::Converged => "converged",
            Self::Interpolating => "interpolating",
            Self::LeastSquaresPolynomial => "least-squares polynomial",
            Self::LeastSquares => "least-squares (fixed knots)",
            Self::KnotBudgetExhausted => "knot budget exhausted",
            Self::IterationLimit => "iteration limit",
            Self::SearchStalled => "search stalled",
            Self::Singular => "singular",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Output of a spline fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult<T> {
    /// Fitted curve.
    pub curve: SplineCurve<T>,

    /// Weighted residual sum of squares of the fit.
    pub fp: T,

    /// Requested smoothing factor.
    pub smoothing: T,

    /// How the fit ended.
    pub status: FitStatus,

    /// Error accompanying a recoverable, non-converged fit.
    pub error: Option<SplineError>,

    /// Number of knot-refinement passes performed.
    pub refinements: usize,

    /// Number of smoothing-parameter iterations performed.
    pub search_iterations: usize,

    /// Final smoothing parameter `p`, when the penalised phase ran.
    pub smoothing_parameter: Option<T>,

    /// Residuals `y - s(x)` at the samples.
    pub residuals: Option<Vec<T>>,

    /// Fit quality metrics.
    pub diagnostics: Option<FitDiagnostics<T>>,
}

impl<T: Float> FitResult<T> {
    /// Whether the fit met its target.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Keep only converged fits, turning the others into their error.
    pub fn into_converged(self) -> core::result::Result<Self, SplineError> {
        match self.error {
            Some(err) if !self.status.is_converged() => Err(err),
            _ => Ok(self),
        }
    }

    /// Evaluate the fitted curve; out-of-domain queries are an error.
    pub fn evaluate(&self, queries: &[T]) -> core::result::Result<Vec<T>, SplineError> {
        self.curve.evaluate(queries)
    }
}

impl<T: Float + Display + Debug> Display for FitResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (lower, upper) = self.curve.domain();
        writeln!(f, "Summary:")?;
        writeln!(f, "  Status:       {}", self.status)?;
        writeln!(f, "  Degree:       {}", self.curve.degree())?;
        writeln!(f, "  Domain:       [{}, {}]", lower, upper)?;
        writeln!(f, "  Knots:        {}", self.curve.num_knots())?;
        writeln!(f, "  Smoothing:    {}", self.smoothing)?;
        writeln!(f, "  fp:           {}", self.fp)?;
        if let Some(p) = self.smoothing_parameter {
            writeln!(f, "  p:            {}", p)?;
        }
        if let Some(err) = &self.error {
            writeln!(f, "  Warning:      {}", err)?;
        }
        writeln!(f)?;

        if let Some(diag) = &self.diagnostics {
            writeln!(f, "{}", diag)?;
            writeln!(f)?;
        }

        writeln!(f, "Interior Knots:")?;
        let interior = self.curve.interior_knots();
        if interior.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for t in interior {
            writeln!(f, "  {:>12.6}", t)?;
        }

        if let Some(resid) = &self.residuals {
            writeln!(f)?;
            writeln!(f, "Residuals:")?;
            let n = resid.len();
            for (i, r) in resid.iter().enumerate() {
                if n > 20 && (10..n - 10).contains(&i) {
                    if i == 10 {
                        writeln!(f, "{:>8}", "...")?;
                    }
                    continue;
                }
                writeln!(f, "{:>8} {:>12.6}", i, r)?;
            }
        }

        Ok(())
    }
}
