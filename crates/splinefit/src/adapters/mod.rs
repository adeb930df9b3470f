//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing execution adapters on top of the engine.
//! The batch adapter fits complete in-memory sample sets.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch adapter for spline fitting.
pub mod batch;
