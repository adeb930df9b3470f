//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns fitted splines into values and quality metrics:
//! - Curve evaluation at arbitrary query abscissas
//! - Diagnostic metrics for fit quality
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Curve evaluation and extrapolation policy.
pub mod evaluate;

/// Diagnostic metrics for fit quality assessment.
pub mod diagnostics;
