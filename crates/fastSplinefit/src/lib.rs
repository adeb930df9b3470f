//! # fastSplinefit: parallel B-spline smoothing for Rust
//!
//! A thin parallel layer over [`splinefit`]. Fitting runs the same knot
//! search and banded least-squares solves as `splinefit`; evaluating fitted
//! curves (at the samples and at user queries) is spread across CPU cores
//! with `rayon`. Inputs may be slices, vectors or `ndarray` arrays.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastSplinefit::prelude::*;
//! use ndarray::Array1;
//!
//! let x = Array1::linspace(0.0, 10.0, 200);
//! let y = x.mapv(|v: f64| v.sin());
//!
//! // Parallel evaluation is the default
//! let model = Spline::new()
//!     .degree(3)
//!     .smoothing(0.01)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! let grid = Array1::linspace(0.0, 10.0, 5000);
//! let values = model.evaluate(&result.curve, &grid)?;
//!
//! assert_eq!(values.len(), 5000);
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ### Sequential execution
//!
//! ```rust
//! use fastSplinefit::prelude::*;
//!
//! let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|&v| v * v).collect();
//!
//! let model = Spline::new()
//!     .adapter(Batch)
//!     .parallel(false)
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! assert!(result.is_converged());
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ## Features
//!
//! - `cpu` (default): parallel evaluation with `rayon`. Without it every
//!   pass runs sequentially.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel evaluation pass.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for spline fitting.
mod api;

// Input data handling.
mod input;

/// Input abstraction shared by `fit`, `fit_weighted` and `evaluate`.
pub use input::SplineInput;

// Standard fastSplinefit prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, Extrapolation, FitDiagnostics, FitResult, FitStatus, ParallelBatchSpline,
        SplineBuilder as Spline, SplineCurve, SplineError,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
