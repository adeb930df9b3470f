//! Input abstractions for spline fitting.
//!
//! ## Purpose
//!
//! This module lets `fit`, `fit_weighted` and `evaluate` accept slices,
//! vectors and one-dimensional ndarray arrays through a single trait.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Every implementation hands out a view of the existing buffer.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected before fitting.
//!
//! ## Invariants
//!
//! * Returned slices cover all elements of the container, in order.
//!
//! ## Non-goals
//!
//! * This module does not sort, clean or reshape data.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Export dependencies from splinefit crate
use splinefit::internals::primitives::errors::SplineError;

/// Types usable as abscissas, values, weights or queries.
pub trait SplineInput<T: Float> {
    /// View the input as a contiguous slice.
    fn as_spline_slice(&self) -> Result<&[T], SplineError>;
}

impl<T: Float> SplineInput<T> for [T] {
    fn as_spline_slice(&self) -> Result<&[T], SplineError> {
        Ok(self)
    }
}

impl<T: Float> SplineInput<T> for Vec<T> {
    fn as_spline_slice(&self) -> Result<&[T], SplineError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S> SplineInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_spline_slice(&self) -> Result<&[T], SplineError> {
        self.as_slice().ok_or_else(|| {
            SplineError::InvalidNumericValue(
                "ndarray input must be contiguous in memory".to_string(),
            )
        })
    }
}
