//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core fitting algorithms:
//! - Banded least-squares fits by Givens triangularisation
//! - Knot construction and residual-driven knot insertion
//! - The smoothing-parameter search for the penalised fit
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Banded weighted least-squares solver.
pub mod least_squares;

/// Knot vectors and knot insertion.
pub mod knots;

/// Smoothing-parameter search.
pub mod smoothing;
