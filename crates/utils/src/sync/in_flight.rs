//! Reentrancy flag with RAII release
//!
//! A second caller that finds the flag raised becomes a no-op instead of
//! racing the first. The guard lowers the flag when dropped, which covers
//! success, error, timeout and a cancelled future alike.

use std::sync::atomic::{AtomicBool, Ordering};

/// A boolean "call in flight" marker
#[derive(Debug, Default)]
pub struct InFlightFlag {
    raised: AtomicBool,
}

impl InFlightFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag, or return `None` if it is already raised
    #[must_use]
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.raised
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { flag: self })
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

/// Lowers its flag on drop
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a InFlightFlag,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.raised.store(false, Ordering::Release);
    }
}
