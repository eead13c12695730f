//! Elevated super-admin session manager
//!
//! Destructive multi-tenant operations in the console are gated behind a
//! short-lived elevated session minted by a remote authority. This crate
//! keeps that session in memory, revalidates it in the background before it
//! expires, and dispatches privileged operations with it.
//!
//! ## Architecture
//!
//! - [`cache`] - the in-memory session and the revalidation timer handle
//! - [`client`] - mint and revalidate calls against the remote authority
//! - [`dispatcher`] - privileged operations, one in flight per operation and target
//! - [`timer`] - the background revalidation loop
//! - [`authority`] - collaborator traits and their HTTP implementations
//! - [`manager`] - [`SuperAdminSession`], the surface used by console screens
//!
//! Dependency order is cache, then client, then dispatcher.

pub mod authority;
pub mod cache;
pub mod client;
pub mod dispatcher;
pub mod manager;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

pub use authority::{
    HttpAuthority, HttpIpLookup, IpLookup, OperationRequest, RemoteAuthority, SessionGrant,
    SessionValidation,
};
pub use cache::SessionCache;
pub use client::{AuthorityClient, Validity};
pub use dispatcher::{OperationDispatcher, PendingOperations};
pub use manager::SuperAdminSession;
