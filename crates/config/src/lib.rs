//! Configuration for the condo super-admin session manager
//!
//! Settings come from an optional JSON file overlaid with `CONDO_*`
//! environment variables, and are validated once at startup.

pub mod config;
pub mod loader;


pub use config::SessionConfig;
pub use loader::ConfigLoader;
