//! Per-family mutation serialization
//!
//! Mutating requests for one family run one at a time, in the order their
//! callers acquired the family's lock. Different families do not block each
//! other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::models::FamilyId;

/// Hands out one lock per family
#[derive(Debug, Clone, Default)]
pub struct MutationQueue {
    locks: Arc<Mutex<HashMap<FamilyId, Arc<Mutex<()>>>>>,
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, family: &FamilyId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(family.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` while holding the family's lock.
    ///
    /// A panic inside a previous holder only poisons the guard, which carries
    /// no data, so the poison is ignored.
    pub fn run<T, F>(&self, family: &FamilyId, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let lock = self.lock_for(family);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        trace!(family = %family, "mutation slot acquired");
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_same_family_never_overlaps() {
        let queue = MutationQueue::new();
        let family = FamilyId::from("f1");
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = queue.clone();
                let family = family.clone();
                let in_flight = Arc::clone(&in_flight);
                let max_seen = Arc::clone(&max_seen);
                thread::spawn(move || {
                    queue.run(&family, || {
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_returns_closure_value() {
        let queue = MutationQueue::new();
        let value = queue.run(&FamilyId::from("f1"), || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_families_have_separate_locks() {
        let queue = MutationQueue::new();
        let a = queue.lock_for(&FamilyId::from("a"));
        let b = queue.lock_for(&FamilyId::from("b"));
        let a_again = queue.lock_for(&FamilyId::from("a"));
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &a_again));
    }
}
