//! Concurrency gate - counting admission control for task bodies

use drover_foundation::{Error, Result};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting admission control bounding how many task bodies may be
/// mid-execution at once
///
/// Cloning is cheap and shares the same slot pool. No fairness or
/// ordering guarantee is made among waiters.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    capacity: usize,
    semaphore: Arc<Semaphore>,
}

/// A held gate slot; dropping it returns the slot to the gate
///
/// Release is RAII so slots come back on every path, cancellation and
/// unwind included.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    /// Create a gate with `capacity` slots
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("max_concurrent must be greater than zero"));
        }
        Ok(Self {
            capacity,
            semaphore: Arc::new(Semaphore::new(capacity)),
        })
    }

    /// Suspend until a slot is free, then take it
    pub async fn acquire(&self) -> Result<GatePermit> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| Error::Internal("concurrency gate closed".into()))?;
        Ok(GatePermit { _permit: permit })
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(ConcurrencyGate::new(0).is_err());
    }

    #[tokio::test]
    async fn test_slot_accounting() {
        let gate = ConcurrencyGate::new(2).unwrap();
        assert_eq!(gate.capacity(), 2);
        assert_eq!(gate.available(), 2);

        let first = gate.acquire().await.unwrap();
        let second = gate.acquire().await.unwrap();
        assert_eq!(gate.available(), 0);

        drop(first);
        assert_eq!(gate.available(), 1);
        drop(second);
        assert_eq!(gate.available(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_slots() {
        let gate = ConcurrencyGate::new(1).unwrap();
        let clone = gate.clone();

        let held = gate.acquire().await.unwrap();
        assert_eq!(clone.available(), 0);
        drop(held);
        assert_eq!(clone.available(), 1);
    }
}
