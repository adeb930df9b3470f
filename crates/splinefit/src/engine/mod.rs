//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a fit: it validates requests, drives the knot
//! placement and smoothing state machine over the algorithms layer, and
//! defines the curve and result types handed back to callers.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fitting state machine and executor.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for spline fitting.
pub mod output;
