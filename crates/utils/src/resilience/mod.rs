//! Resilience helpers for remote calls.
//!
//! ## Key Components
//!
//! - **`timeout`**: Bounds a future in time and converts an elapsed deadline
//!   into `Error::Timeout`, so a call that never answers still settles.

pub mod timeout;

pub use timeout::{with_deadline, with_timeout};
