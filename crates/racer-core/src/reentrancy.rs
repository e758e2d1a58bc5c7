//! # Reentrancy Guard
//!
//! `transfer_value` yields control to an external recipient that may
//! re-enter the Controller. Every value-transferring operation
//! (`claim_reward`, `batch_claim_reward`) must be surrounded by this guard;
//! a re-entrant invocation fails fast with `Reentrancy` rather than
//! re-running checks-effects-interactions logic against half-mutated state.
//! This core has no accounts, just a plain flag on the Controller guarded
//! by an RAII scope that releases it on drop.

use tracing::warn;

use crate::errors::{CoreResult, RacerError};

/// Lock state for a single guarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReentrancyLock {
    locked: bool,
}

impl ReentrancyLock {
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// RAII guard: acquires on construction, releases on `Drop`. Nested
/// acquisition on an already-locked flag fails with `Reentrancy`.
pub struct ReentrancyGuard<'a> {
    lock: &'a mut ReentrancyLock,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn enter(lock: &'a mut ReentrancyLock) -> CoreResult<Self> {
        if lock.locked {
            warn!("reentrant call rejected");
            return Err(RacerError::Reentrancy);
        }
        lock.locked = true;
        Ok(Self { lock })
    }
}

impl<'a> Drop for ReentrancyGuard<'a> {
    fn drop(&mut self) {
        self.lock.locked = false;
    }
}
