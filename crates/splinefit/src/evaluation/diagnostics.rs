//! Diagnostic metrics for spline fit quality assessment.
//!
//! ## Purpose
//!
//! This module summarises how closely a fitted spline follows its samples.
//!
//! ## Design notes
//!
//! * **Residual-based**: Metrics are computed from residuals (y - ŷ) at the sample abscissas.
//! * **Weighted and unweighted**: `weighted_rss` is the quantity the fitter
//!   compares against the smoothing factor; the others ignore weights.
//! * **Generics**: All computations are generic over `Float` types.
//!
//! ## Invariants
//!
//! * RSS, weighted RSS, RMSE, MAE and the maximum absolute residual are non-negative.
//! * R^2 <= 1 (R^2 = 1 is a perfect fit).
//!
//! ## Non-goals
//!
//! * This module does not perform the fitting.
//! * This module does not provide p-values or formal hypothesis tests.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Diagnostic metrics for assessing spline fit quality.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDiagnostics<T> {
    /// Residual sum of squares.
    pub rss: T,

    /// Weighted residual sum of squares, `sum (w_i r_i)^2`.
    pub weighted_rss: T,

    /// Root Mean Squared Error (RMSE).
    pub rmse: T,

    /// Mean Absolute Error (MAE).
    pub mae: T,

    /// Largest absolute residual.
    pub max_abs_residual: T,

    /// Coefficient of determination (R^2).
    pub r_squared: T,
}

impl<T: Float> FitDiagnostics<T> {
    /// Compute diagnostics from observed values, fitted values and weights.
    pub fn compute(y: &[T], fitted: &[T], weights: &[T]) -> Self {
        let n = y.len();
        if n == 0 {
            return Self {
                rss: T::zero(),
                weighted_rss: T::zero(),
                rmse: T::zero(),
                mae: T::zero(),
                max_abs_residual: T::zero(),
                r_squared: T::zero(),
            };
        }
        let n_t = T::from(n).unwrap_or(T::one());

        let mut rss = T::zero();
        let mut weighted_rss = T::zero();
        let mut sum_abs = T::zero();
        let mut max_abs = T::zero();
        let mut sum_y = T::zero();

        for ((&yi, &fi), &wi) in y.iter().zip(fitted.iter()).zip(weights.iter()) {
            let r = yi - fi;
            rss = rss + r * r;
            weighted_rss = weighted_rss + (wi * r) * (wi * r);
            sum_abs = sum_abs + r.abs();
            max_abs = max_abs.max(r.abs());
            sum_y = sum_y + yi;
        }

        let mean_y = sum_y / n_t;
        let ss_tot = y
            .iter()
            .fold(T::zero(), |acc, &yi| acc + (yi - mean_y) * (yi - mean_y));

        // Constant data: any exact fit explains everything.
        let r_squared = if ss_tot > T::zero() {
            T::one() - rss / ss_tot
        } else if rss == T::zero() {
            T::one()
        } else {
            T::zero()
        };

        Self {
            rss,
            weighted_rss,
            rmse: (rss / n_t).sqrt(),
            mae: sum_abs / n_t,
            max_abs_residual: max_abs,
            r_squared,
        }
    }
}

impl<T: Float + Display> Display for FitDiagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Spline Diagnostics:")?;
        writeln!(f, "  RSS:           {:.6}", self.rss)?;
        writeln!(f, "  Weighted RSS:  {:.6}", self.weighted_rss)?;
        writeln!(f, "  RMSE:          {:.6}", self.rmse)?;
        writeln!(f, "  MAE:           {:.6}", self.mae)?;
        writeln!(f, "  Max |resid|:   {:.6}", self.max_abs_residual)?;
        write!(f, "  R^2:           {:.6}", self.r_squared)
    }
}
