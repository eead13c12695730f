//! Domain types shared by the session manager and its collaborators

mod context;
mod operation;
mod remote;
mod token;

pub use context::AccessContext;
pub use operation::{OperationKey, RequestId};
pub use remote::{RemoteError, RemoteStatus};
pub use token::SessionToken;
