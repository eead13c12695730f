//! Error types and classification for super-admin operations

mod builders;
mod conversions;
mod display;
mod extensions;
mod types;

pub use extensions::*;
pub use types::{Error, ErrorKind, Result};
