//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure numerical kernels of spline fitting:
//! - B-spline basis evaluation (de Boor / Cox recurrence)
//! - Givens rotations and banded back substitution
//! - Jumps of the kth derivative at interior knots
//!
//! These are stateless building blocks with no fitting-strategy logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// B-spline basis functions and knot-interval search.
pub mod basis;

/// Givens rotations and banded triangular solves.
pub mod givens;

/// Discontinuity jumps of the kth derivative.
pub mod discontinuity;
