//! Elevated session credential

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque capability token for an elevated session
///
/// The value is wiped from memory on drop and never shows up in `Debug`
/// output, so it is safe to carry inside structs that get logged.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token received from the remote authority
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token for sending it back to the remote authority
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl PartialEq<&str> for SessionToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
