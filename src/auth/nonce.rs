//! Nonce generation for Coincheck API authentication.
//!
//! Coincheck rejects any request whose `ACCESS-NONCE` is not greater than the
//! last one it accepted for the same key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Uses whole seconds since UNIX epoch. Requests issued within the same second
/// get `last + 1`, so the sequence may briefly run ahead of the clock under
/// bursts but never repeats or goes backwards.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    fn current_time_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = Self::current_time_secs();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = time_nonce.max(last + 1);

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

/// A counter-based nonce provider independent of the system clock.
///
/// Returns `start`, `start + 1`, ... Useful for tests and for replaying a
/// session against a known server state.
#[derive(Debug)]
pub struct SequenceNonce {
    next: AtomicU64,
}

impl SequenceNonce {
    /// Create a sequence whose first nonce is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl NonceProvider for SequenceNonce {
    fn next_nonce(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
