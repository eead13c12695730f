//! In-memory elevated session
//!
//! The session is either fully present (token and expiry) or absent; both
//! fields sit behind one lock so no reader sees half of an update. It is
//! never written to disk.

use chrono::{DateTime, Utc};
use condo_core::SessionToken;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
struct Session {
    token: SessionToken,
    expires_at: DateTime<Utc>,
}

/// Holds the elevated session and the handle of its revalidation timer
#[derive(Debug, Default)]
pub struct SessionCache {
    session: Mutex<Option<Session>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl SessionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if a session exists and has not expired
    ///
    /// Observing an expired session clears it and stops the timer.
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.token_at(Utc::now())
    }

    pub(crate) fn token_at(&self, now: DateTime<Utc>) -> Option<SessionToken> {
        let mut session = self.session.lock();
        match session.as_ref() {
            None => return None,
            Some(current) if now < current.expires_at => return Some(current.token.clone()),
            Some(_) => {}
        }
        *session = None;
        drop(session);

        tracing::info!("elevated session expired");
        self.stop_timer();
        None
    }

    /// Replace the session; the only way to populate it
    pub fn set_session(&self, token: SessionToken, expires_at: DateTime<Utc>) {
        *self.session.lock() = Some(Session { token, expires_at });
        tracing::debug!(expires_at = %expires_at, "elevated session stored");
    }

    /// Move the expiry of the session holding `token`
    ///
    /// Returns `false` and leaves the cache alone when the session was
    /// cleared or replaced since `token` was read.
    pub(crate) fn refresh_expiry(&self, token: &SessionToken, expires_at: DateTime<Utc>) -> bool {
        let mut session = self.session.lock();
        match session.as_mut() {
            Some(current) if current.token == *token => {
                current.expires_at = expires_at;
                true
            }
            _ => false,
        }
    }

    /// Clear the session only if it still holds `token`
    ///
    /// Returns whether a session was removed. The check and the removal
    /// happen under one lock so a session stored concurrently survives.
    pub(crate) fn invalidate(&self, token: &SessionToken) -> bool {
        let removed = {
            let mut session = self.session.lock();
            if session.as_ref().is_some_and(|current| current.token == *token) {
                session.take().is_some()
            } else {
                false
            }
        };
        if removed {
            self.stop_timer();
            tracing::info!("elevated session cleared");
        }
        removed
    }

    /// Drop the session and stop the revalidation timer; safe when empty
    pub fn clear(&self) {
        let had_session = self.session.lock().take().is_some();
        self.stop_timer();
        if had_session {
            tracing::info!("elevated session cleared");
        }
    }

    /// Expiry of the held session, without checking it against the clock
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.lock().as_ref().map(|s| s.expires_at)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }

    /// Install the revalidation timer, aborting any previous one
    pub(crate) fn install_timer(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.timer.lock().replace(handle) {
            previous.abort();
        }
    }

    pub(crate) fn stop_timer(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
        }
    }

    /// Whether a revalidation timer is installed and still running
    #[must_use]
    pub fn has_timer(&self) -> bool {
        self.timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Option<(SessionToken, DateTime<Utc>)> {
        self.session
            .lock()
            .as_ref()
            .map(|s| (s.token.clone(), s.expires_at))
    }
}

impl Drop for SessionCache {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
