//! Shared utilities for the condo workspace
//!
//! Small, dependency-light helpers used by the session manager and the
//! console binary: tracing setup, bounded-time execution of remote calls,
//! and reentrancy guards.

pub mod resilience;
pub mod sync;
pub mod tracing;

pub use resilience::*;
pub use sync::*;
