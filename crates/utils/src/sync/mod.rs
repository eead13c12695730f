//! Synchronization primitives for async call sites

pub mod in_flight;

pub use in_flight::{InFlightFlag, InFlightGuard};
