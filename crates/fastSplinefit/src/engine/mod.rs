//! Layer 5: Engine
//!
//! This layer provides the parallel evaluation pass for fitted splines.
//! It distributes curve evaluation across CPU cores.

// Parallel evaluation using CPU threads
pub mod executor;
