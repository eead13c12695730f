//! Core domain types, errors, and constants for the condo super-admin console.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias. Every failure that can
//!   reach a console screen is one of these variants, and its `Display` is the
//!   message shown to the operator.
//! - **`types`**: Newtypes for the elevated session token, the deduplication
//!   key of a privileged operation, remote status codes and the access context
//!   sent when minting a session.
//! - **`constants`**: Remote function names, sentinels and environment
//!   variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, ErrorKind, Result},
    types::*,
};
