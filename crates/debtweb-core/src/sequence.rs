//! Request sequencing for page refreshes
//!
//! Overlapping refreshes of the same kind can complete out of order. Each
//! refresh takes a token before its request is sent. A successful response
//! is applied only if no newer response has been applied already, so an old
//! response never overwrites a newer render, while a newer refresh that
//! fails does not block an older one that succeeded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Token identifying one refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens for one refresh kind and tracks
/// the newest one whose response was applied
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl RefreshSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn applied_guard(&self) -> MutexGuard<'_, u64> {
        self.applied.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a refresh
    pub fn begin(&self) -> RefreshToken {
        RefreshToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Run `apply` for `token` unless a newer response was already applied.
    ///
    /// Returns `None` when the response is stale. The token only counts as
    /// applied when `apply` returns `Ok`. The check and `apply` run under one
    /// lock, so two responses cannot interleave their renders.
    pub fn apply_if_newer<T, E>(
        &self,
        token: RefreshToken,
        apply: impl FnOnce() -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        let mut applied = self.applied_guard();
        if token.0 <= *applied {
            return None;
        }
        let result = apply();
        if result.is_ok() {
            *applied = token.0;
        }
        Some(result)
    }

    /// Newest token issued so far
    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Newest token whose response was applied, 0 if none
    pub fn last_applied(&self) -> u64 {
        *self.applied_guard()
    }
}
