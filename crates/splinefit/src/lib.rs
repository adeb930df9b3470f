//! # splinefit: smoothing B-spline curve fitting for Rust
//!
//! Fits a smoothing B-spline to ordered, optionally weighted samples of a
//! scalar signal and evaluates the fitted curve at arbitrary abscissas.
//!
//! ## How it works
//!
//! A fit starts from the least-squares polynomial (no interior knots) and
//! inserts knots where the residuals concentrate until the weighted residual
//! sum of squares `fp` drops to the smoothing factor `s`. If the knot set
//! overshoots (`fp < s`), a penalty on the jumps of the kth derivative pulls
//! `fp` back up to `s`. With `s = 0` the spline interpolates the samples.
//! Every least-squares solve is a banded QR factorisation built from Givens
//! rotations.
//!
//! ## Quick Start
//!
//! ```rust
//! use splinefit::prelude::*;
//!
//! let x = vec![0.0, 50.0, 75.0, 140.0, 150.0, 200.0, 300.0, 350.0, 450.0, 500.0];
//! let y = vec![40.0, 70.0, 90.0, 150.0, 160.0, 200.0, 80.0, 30.0, 50.0, 80.0];
//!
//! // Cubic interpolating spline
//! let model = Spline::new()
//!     .degree(3)
//!     .smoothing(0.0)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! let values = result.curve.evaluate(&[25.0, 100.0, 400.0])?;
//!
//! assert_eq!(values.len(), 3);
//! println!("{}", result);
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ### Smoothing
//!
//! ```rust
//! use splinefit::prelude::*;
//!
//! let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.2).collect();
//! let y: Vec<f64> = x.iter().map(|&v| v.sin() + 0.05 * (7.0 * v).cos()).collect();
//!
//! let model = Spline::new()
//!     .degree(3)
//!     .smoothing(0.1)
//!     .return_diagnostics()
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! println!("{} knots, fp = {}", result.curve.num_knots(), result.fp);
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns `Result<FitResult<T>, SplineError>`.
//!
//! - **`Err(SplineError)`**: Invalid input or configuration, or a
//!   rank-deficient system with no usable fit.
//! - **`Ok(FitResult<T>)`**: A usable curve. When the fit stopped short of
//!   its target (e.g. the knot budget ran out) `result.status` says so and
//!   `result.error` carries the matching error. Call
//!   `result.into_converged()` to treat such fits as failures.
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! splinefit = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Dierckx, P. (1975). "An algorithm for smoothing, differentiation and
//!   integration of experimental data using spline functions"
//! - Dierckx, P. (1993). "Curve and Surface Fitting with Splines"
//! - de Boor, C. (1978). "A Practical Guide to Splines"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure numerical kernels.
mod math;

// Layer 3: Algorithms - least squares, knot placement, smoothing search.
mod algorithms;

// Layer 4: Evaluation - curve evaluation and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for spline fitting.
mod api;

// Plain entry points.
pub use api::{evaluate, fit};

// Standard spline prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, BatchSpline, Extrapolation, FitDiagnostics, FitResult, FitStatus,
        SplineBuilder as Spline, SplineCurve, SplineError,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
