//! Layer 6: Adapters
//!
//! This layer provides the user-facing batch API that adapts the engine layer
//! for parallel or sequential execution.

// Unified batch adapter for spline fitting.
pub mod batch;
