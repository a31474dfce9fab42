//! Per-club serialisation for lifecycle writes.
//!
//! The exactly-one-president invariant cannot survive interleaved writers,
//! so every mutating lifecycle operation holds its club's lock from first
//! read to final write. Locks are handed out lazily per club id and shared
//! between the membership and club services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::club::ClubId;

/// Registry of per-club async locks.
///
/// The outer `std` mutex only guards the map itself and is never held across
/// an await point.
#[derive(Debug, Default)]
pub struct ClubLockRegistry {
    locks: StdMutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl ClubLockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive section for a club, waiting if another
    /// operation on the same club is in flight.
    pub async fn acquire(&self, club_id: &ClubId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(*club_id.as_uuid())
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }
}
